use crate::*;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use core::sync::atomic::{AtomicUsize, Ordering};

use winlist::{ListOptions, VisibleRange};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Invoice {
    number: u32,
    customer: &'static str,
    total_cents: u64,
}

fn invoices(n: usize) -> Vec<Invoice> {
    const CUSTOMERS: [&str; 4] = ["acme", "globex", "initech", "umbrella"];
    (0..n)
        .map(|i| Invoice {
            number: 1000 + i as u32,
            customer: CUSTOMERS[i % CUSTOMERS.len()],
            total_cents: ((i * 7919) % 10_000) as u64,
        })
        .collect()
}

fn columns() -> Vec<Column<Invoice>> {
    vec![
        Column::new("number", "No.", |inv: &Invoice, _| inv.number.to_string())
            .with_width(80)
            .with_sort_key(|inv| inv.number),
        Column::with_value(
            "total",
            "Total",
            |inv: &Invoice| inv.total_cents,
            |cents, _, _| format!("{}.{:02}", cents / 100, cents % 100),
        )
        .with_align(CellAlign::End)
        .with_sort_key(|inv| inv.total_cents),
        // Not sortable.
        Column::new("customer", "Customer", |inv: &Invoice, _| inv.customer.to_string()),
    ]
}

fn ready_table(len: usize) -> Table<Invoice> {
    let mut table = Table::new(ListOptions::new(20, 100), columns())
        .unwrap()
        .with_selection(true);
    table.set_len(len);
    table.set_loading(false);
    table
}

fn populated<K, C>(view: TableView<K, C>) -> (Vec<HeaderCell>, TableBody<K, C>) {
    match view {
        TableView::Populated { header, body } => (header, body),
        _ => panic!("expected a populated table"),
    }
}

#[test]
fn sort_click_on_new_key_starts_ascending() {
    let table = ready_table(10);
    let s = table.click_header("number", &SortState::unsorted());
    assert_eq!(s, SortState::by("number", SortDirection::Asc));

    let s = table.click_header("total", &SortState::by("number", SortDirection::Desc));
    assert_eq!(s, SortState::by("total", SortDirection::Asc));
}

#[test]
fn sort_click_on_active_key_flips_direction() {
    let table = ready_table(10);
    let asc = table.click_header("number", &SortState::unsorted());
    let desc = table.click_header("number", &asc);
    let asc_again = table.click_header("number", &desc);
    assert_eq!(desc.direction, SortDirection::Desc);
    assert_eq!(asc_again, asc);
}

#[test]
fn sort_click_on_non_sortable_or_unknown_key_is_ignored() {
    let table = ready_table(10);
    let current = SortState::by("total", SortDirection::Desc);
    assert_eq!(table.click_header("customer", &current), current);
    assert_eq!(table.click_header("missing", &current), current);
    assert_eq!(
        table.click_header("customer", &SortState::unsorted()),
        SortState::unsorted()
    );
}

#[test]
fn sort_rows_uses_active_column_comparator() {
    let cols = columns();
    let mut rows = invoices(20);

    assert!(SortState::by("total", SortDirection::Asc).sort_rows(&mut rows, &cols));
    assert!(rows.windows(2).all(|w| w[0].total_cents <= w[1].total_cents));

    assert!(SortState::by("number", SortDirection::Desc).sort_rows(&mut rows, &cols));
    assert!(rows.windows(2).all(|w| w[0].number > w[1].number));

    let before = rows.clone();
    assert!(!SortState::unsorted().sort_rows(&mut rows, &cols));
    assert!(!SortState::by("customer", SortDirection::Asc).sort_rows(&mut rows, &cols));
    assert_eq!(rows, before);
}

#[test]
fn select_all_tri_state_follows_selection_size() {
    let n = 6;
    assert_eq!(
        SelectAllState::derive(&SelectionSet::new(), n),
        SelectAllState::Unchecked
    );
    assert_eq!(
        SelectAllState::derive(&SelectionSet::from([2, 5]), n),
        SelectAllState::Indeterminate
    );
    assert_eq!(
        SelectAllState::derive(&SelectionSet::all(n), n),
        SelectAllState::Checked
    );
    assert_eq!(
        SelectAllState::derive(&SelectionSet::new(), 0),
        SelectAllState::Unchecked
    );
}

#[test]
fn select_all_from_partial_selects_everything_then_clears() {
    let table = ready_table(6);
    let partial = SelectionSet::from([2, 5]);

    let all = table.toggle_select_all(&partial, 6);
    assert_eq!(all.iter().collect::<Vec<_>>(), [0, 1, 2, 3, 4, 5]);
    // The caller's value is never mutated.
    assert_eq!(partial.iter().collect::<Vec<_>>(), [2, 5]);

    let none = table.toggle_select_all(&all, 6);
    assert!(none.is_empty());

    assert_eq!(table.toggle_select_all(&none, 6).len(), 6);
}

#[test]
fn select_all_recomputes_against_current_length() {
    // Selected everything while there were 6 rows; the collection then grew to 8.
    let selection = SelectionSet::all(6);
    assert_eq!(
        SelectAllState::derive(&selection, 8),
        SelectAllState::Indeterminate
    );

    // Then shrank to 4: stale members do not count, and are not pruned implicitly.
    assert_eq!(SelectAllState::derive(&selection, 4), SelectAllState::Checked);
    assert_eq!(selection.stale(4).collect::<Vec<_>>(), [4, 5]);
    assert_eq!(selection.len(), 6);
    assert_eq!(selection.pruned(4).len(), 4);
}

#[test]
fn stale_selection_never_reads_as_fully_checked() {
    let selection = SelectionSet::from([0, 1, 9]);
    assert_eq!(
        SelectAllState::derive(&selection, 3),
        SelectAllState::Indeterminate
    );
    let table = ready_table(3);
    assert_eq!(table.toggle_select_all(&selection, 3), SelectionSet::all(3));
}

#[test]
fn toggle_row_flips_membership_and_ignores_out_of_range_rows() {
    let table = ready_table(5);
    let s = table.toggle_row(&SelectionSet::new(), 3, 5);
    assert!(s.contains(3));
    let s = table.toggle_row(&s, 3, 5);
    assert!(s.is_empty());
    assert_eq!(table.toggle_row(&s, 7, 5), s);
}

#[test]
fn selection_gestures_are_inert_without_row_selection() {
    let mut table = Table::new(ListOptions::new(20, 100), columns()).unwrap();
    table.set_len(4);
    table.set_loading(false);
    let s = SelectionSet::from([1]);
    assert_eq!(table.toggle_select_all(&s, 4), s);
    assert_eq!(table.toggle_row(&s, 2, 4), s);

    let rows = invoices(4);
    let (header, body) = populated(table.render(&rows, &SortState::unsorted(), &s));
    assert!(matches!(header[0], HeaderCell::Column(_)));
    assert!(body.rows.iter().all(|r| r.selected.is_none()));
}

#[test]
fn header_has_selection_cell_and_sort_markers() {
    let table = ready_table(6);
    let header = table.header(
        &SortState::by("total", SortDirection::Desc),
        &SelectionSet::from([1]),
        6,
    );
    assert_eq!(header.len(), 4);
    assert_eq!(header[0], HeaderCell::Selection(SelectAllState::Indeterminate));

    let cols: Vec<&ColumnHeader> = header
        .iter()
        .filter_map(|c| match c {
            HeaderCell::Column(h) => Some(h),
            HeaderCell::Selection(_) => None,
        })
        .collect();
    assert_eq!(cols[0].key, "number");
    assert_eq!(cols[0].width, Some(80));
    assert_eq!(cols[0].sort, None);
    assert_eq!(cols[1].sort, Some(SortDirection::Desc));
    assert_eq!(cols[1].align, CellAlign::End);
    assert!(!cols[2].sortable);
}

#[test]
fn new_table_starts_loading_and_skips_the_list() {
    let mut table = Table::new(ListOptions::new(20, 100), columns()).unwrap();
    let rows = invoices(50);
    let view = table.render(&rows, &SortState::unsorted(), &SelectionSet::new());
    assert_eq!(view, TableView::Loading);
    assert_eq!(table.phase(rows.len()), TablePhase::Loading);
}

#[test]
fn empty_collection_renders_empty_state() {
    let mut table = ready_table(0);
    let view = table.render(&[], &SortState::unsorted(), &SelectionSet::from([3]));
    assert_eq!(view.phase(), TablePhase::Empty);
}

#[test]
fn phases_follow_loading_and_length() {
    let mut table = ready_table(10);
    assert_eq!(table.phase(10), TablePhase::Populated);
    assert_eq!(table.phase(0), TablePhase::Empty);
    table.reload();
    assert!(table.is_loading());
    assert_eq!(table.phase(10), TablePhase::Loading);
    assert_eq!(table.phase(0), TablePhase::Loading);
    table.set_loading(false);
    assert_eq!(table.phase(10), TablePhase::Populated);
}

#[test]
fn body_renders_only_the_window() {
    let rows = invoices(1_000);
    let mut table = ready_table(rows.len()).with_row_class(|inv: &Invoice, _| {
        (inv.customer == "acme").then(|| "highlight".to_string())
    });
    table.list_mut().set_overscan(1);
    table.list_mut().scroll_to_index(100);

    let selection = SelectionSet::from([100, 102]);
    let (_, body) = populated(table.render(&rows, &SortState::unsorted(), &selection));

    // 20px rows in a 100px viewport at offset 2000: rows 100..=105 visible, +-1 overscan.
    assert_eq!(
        body.range,
        Some(VisibleRange {
            start_index: 99,
            end_index: 106
        })
    );
    assert_eq!(body.metrics.total_extent, 20_000);
    assert_eq!(body.metrics.offset, Some(99 * 20));
    assert_eq!(body.rows.len(), 8);

    let first = &body.rows[1];
    assert_eq!(first.index, 100);
    assert_eq!(first.key, 100);
    assert_eq!(first.start, 2_000);
    assert_eq!(first.selected, Some(true));
    assert_eq!(first.class.as_deref(), Some("highlight"));
    assert_eq!(
        first.content,
        RowContent::Cells(vec![
            String::from("1100"),
            format!("{}.{:02}", rows[100].total_cents / 100, rows[100].total_cents % 100),
            String::from("acme"),
        ])
    );

    assert_eq!(body.rows[2].selected, Some(false));
    assert_eq!(body.rows[2].class, None);
}

#[test]
fn fast_scrolling_defers_cells_to_placeholders() {
    let rows = invoices(1_000);
    let mut table = ready_table(rows.len());
    table.list_mut().notify_scroll(4_000, 0);

    let (_, body) = populated(table.render(&rows, &SortState::unsorted(), &SelectionSet::new()));
    assert!(body.is_fast_scrolling);
    for row in &body.rows {
        let eager = row.index % 10 == 0;
        assert_eq!(matches!(row.content, RowContent::Cells(_)), eager, "row {}", row.index);
    }
    assert!(body.rows.iter().any(|r| r.content == RowContent::Placeholder));

    assert!(table.list_mut().tick(150));
    let (_, body) = populated(table.render(&rows, &SortState::unsorted(), &SelectionSet::new()));
    assert!(
        body.rows
            .iter()
            .all(|r| matches!(r.content, RowContent::Cells(_)))
    );
}

#[test]
fn stale_selection_entries_do_not_break_rendering() {
    let rows = invoices(3);
    let mut table = ready_table(3);
    let selection = SelectionSet::from([1, 40]);
    let (header, body) = populated(table.render(&rows, &SortState::unsorted(), &selection));
    assert_eq!(header[0], HeaderCell::Selection(SelectAllState::Indeterminate));
    let selected: Vec<usize> = body
        .rows
        .iter()
        .filter(|r| r.selected == Some(true))
        .map(|r| r.index)
        .collect();
    assert_eq!(selected, [1]);
}

#[test]
fn table_rejects_invalid_list_configuration() {
    let err = Table::new(ListOptions::<Invoice>::new(0, 100), columns()).unwrap_err();
    assert_eq!(
        err,
        winlist::Error::InvalidConfiguration(winlist::ConfigIssue::ZeroItemExtent)
    );
}

#[test]
fn sort_direction_flips() {
    assert_eq!(SortDirection::Asc.flipped(), SortDirection::Desc);
    assert_eq!(SortDirection::Desc.flipped(), SortDirection::Asc);
    assert_eq!(SortDirection::default(), SortDirection::Asc);
}

#[test]
fn shrinking_collection_clamps_scroll_to_rendered_length() {
    let resolved = Arc::new(AtomicUsize::new(usize::MAX));
    let options = ListOptions::new(20, 100).with_on_scroll_to_index(Some({
        let resolved = Arc::clone(&resolved);
        move |index| resolved.store(index, Ordering::Relaxed)
    }));
    let mut table = Table::new(options, columns()).unwrap().with_selection(true);
    table.set_len(1_000);
    table.set_loading(false);

    let rows = invoices(30);
    let sort = SortState::unsorted();
    let selection = SelectionSet::new();
    table.render(&rows, &sort, &selection);
    assert_eq!(table.list().len(), 30);

    let target = table.list_mut().scroll_to_index(500).unwrap();
    assert_eq!(target.index, 29);
    assert!(target.was_clamped());
    assert_eq!(resolved.load(Ordering::Relaxed), 29);

    let (_, body) = populated(table.render(&rows, &sort, &selection));
    assert_eq!(body.metrics.total_extent, table.list().total_extent());
    assert_eq!(body.metrics.total_extent, 600);
    assert_eq!(body.rows.last().map(|r| r.index), Some(29));
    assert!(body.rows.len() > 1);
}

#[test]
fn table_scroll_to_index_syncs_length_first() {
    let mut table = ready_table(1_000);
    let target = table.scroll_to_index(500, 30).unwrap();
    assert_eq!(target.index, 29);
    assert_eq!(target.offset, 29 * 20);
    assert_eq!(table.list().len(), 30);
    assert!(table.scroll_to_index(3, 0).is_none());
}
