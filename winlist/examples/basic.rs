use winlist::{ListOptions, WindowedList};

fn main() {
    let rows: Vec<String> = (0..1_000_000).map(|i| format!("row #{i}")).collect();

    let mut list = match WindowedList::with_len(ListOptions::new(20, 600), rows.len()) {
        Ok(list) => list,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };
    list.set_scroll_offset(123_456);

    let window = list.render(&rows);
    println!("total_extent={}", window.metrics.total_extent);
    println!("window_offset={:?}", window.metrics.offset);
    println!("visible_range={:?}", window.range);
    println!("first_visible={:?}", window.items.first().map(|it| it.item));

    if let Some(target) = list.scroll_to_index(2_000_000) {
        println!(
            "after scroll_to_index: index={} offset={} clamped={}",
            target.index,
            target.offset,
            target.was_clamped()
        );
    }
}
