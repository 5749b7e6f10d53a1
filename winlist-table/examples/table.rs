use winlist::ListOptions;
use winlist_table::{
    CellAlign, Column, HeaderCell, RowContent, SelectionSet, SortState, Table, TableView,
};

struct Order {
    id: u32,
    customer: String,
    amount_cents: u64,
}

fn main() {
    let mut rows: Vec<Order> = (0..50_000u32)
        .map(|i| Order {
            id: i,
            customer: format!("customer-{}", i % 97),
            amount_cents: u64::from(i.wrapping_mul(2_654_435_761) % 100_000),
        })
        .collect();

    let columns = vec![
        Column::new("id", "ID", |o: &Order, _| o.id.to_string())
            .with_width(60)
            .with_sort_key(|o| o.id),
        Column::new("customer", "Customer", |o: &Order, _| o.customer.clone()),
        Column::with_value(
            "amount",
            "Amount",
            |o: &Order| o.amount_cents,
            |cents, _, _| format!("{}.{:02}", cents / 100, cents % 100),
        )
        .with_align(CellAlign::End)
        .with_sort_key(|o| o.amount_cents),
    ];

    let mut table = match Table::new(ListOptions::new(24, 240), columns) {
        Ok(table) => table.with_selection(true),
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    let mut sort = SortState::unsorted();
    let mut selection = SelectionSet::new();

    // First paint happens before the rows arrive.
    println!("{:?}", table.render(&rows, &sort, &selection).phase());

    table.set_len(rows.len());
    table.set_loading(false);

    // Click "Amount" twice: ascending, then descending.
    for _ in 0..2 {
        sort = table.click_header("amount", &sort);
    }
    sort.sort_rows(&mut rows, table.columns());

    selection = table.toggle_row(&selection, 3, rows.len());
    selection = table.toggle_row(&selection, 7, rows.len());
    table.list_mut().scroll_to_index(0);

    print_view(table.render(&rows, &sort, &selection));

    // A fling: only sampled rows carry cells until the settle deadline passes.
    table.list_mut().notify_scroll(240_000, 1_000);
    print_view(table.render(&rows, &sort, &selection));
    table.list_mut().tick(1_200);
    print_view(table.render(&rows, &sort, &selection));
}

fn print_view(view: TableView<usize, String>) {
    let phase = view.phase();
    let TableView::Populated { header, body } = view else {
        println!("{phase:?}");
        return;
    };
    let labels: Vec<String> = header
        .iter()
        .map(|cell| match cell {
            HeaderCell::Selection(state) => format!("[{state:?}]"),
            HeaderCell::Column(h) => match h.sort {
                Some(dir) => format!("{} ({dir:?})", h.label),
                None => h.label.clone(),
            },
        })
        .collect();
    println!(
        "{} | range={:?} fast={}",
        labels.join(" | "),
        body.range,
        body.is_fast_scrolling
    );
    for row in body.rows.iter().take(6) {
        let mark = if row.selected == Some(true) { "x" } else { " " };
        match &row.content {
            RowContent::Cells(cells) => println!("  [{mark}] @{} {}", row.start, cells.join(" | ")),
            RowContent::Placeholder => println!("  [{mark}] @{} ...", row.start),
        }
    }
}
