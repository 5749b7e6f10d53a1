use winlist::{ListConfig, ListOptions, WindowedList};

fn main() {
    let rows: Vec<u32> = (0..10_000).collect();

    // A host would typically load this from its settings.
    let mut config = ListConfig::new(50, 500);
    config.fast_scroll_sample_rate = 5;

    let options = match ListOptions::from_config(&config) {
        Ok(options) => options.with_on_change(Some(|_: &WindowedList<u32>, fast: bool| {
            println!("on_change: is_fast_scrolling={fast}");
        })),
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };
    let Ok(mut list) = WindowedList::with_len(options, rows.len()) else {
        return;
    };

    // Simulate a wheel burst: one event every 16ms.
    let mut now_ms = 0;
    for step in 0..10u64 {
        list.notify_scroll(step * 400, now_ms);
        list.tick(now_ms);
        let rendered = list.render_with(&rows, |row, _, eager| eager.then_some(*row));
        let eager = rendered.iter().filter(|r| r.is_some()).count();
        println!("t={now_ms}ms eager={eager}/{}", rendered.len());
        now_ms += 16;
    }

    // Let it settle.
    while !list.tick(now_ms) {
        now_ms += 16;
    }
    println!("settled at t={now_ms}ms, fast={}", list.is_fast_scrolling());
}
