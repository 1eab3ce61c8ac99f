use looping_selector::{
    Key, LoopingSelector, MemoryScrollHost, Modifiers, ScrollHost, SelectionChanged,
    SelectorEvent, SelectorOptions,
};

fn print_window(s: &LoopingSelector<u32, MemoryScrollHost>) {
    let minutes: Vec<String> = s
        .realized_items()
        .filter_map(|id| s.item_content(id))
        .map(|m| format!("{m:02}"))
        .collect();
    println!(
        "offset={} range={:?} selected={:02} window=[{}]",
        s.host().map(ScrollHost::vertical_offset).unwrap_or_default(),
        s.realized_range(),
        s.selected_index(),
        minutes.join(" ")
    );
}

fn main() -> looping_selector::Result<()> {
    // Simulate an adapter that owns the scroll viewer and forwards its events.
    let options = SelectorOptions::new(40)
        .with_selected_index(45)
        .with_on_selection_changed(Some(|change: &SelectionChanged<u32>| {
            println!("  selection {:?} -> {:?}", change.old_item, change.new_item);
        }));
    let mut s = LoopingSelector::new(options);
    s.apply_template(MemoryScrollHost::new(200.0));
    s.set_items((0..60).collect())?;
    s.arrange(120.0, 200.0)?;
    print_window(&s);

    // A flick that settles twenty minutes later wraps past the hour.
    if let Some(host) = s.host_mut() {
        let to = host.vertical_offset() + 20.0 * 40.0;
        host.user_scroll_to(to);
    }
    s.process_host_events()?;
    print_window(&s);

    // Keyboard: one animated step down.
    s.on_key_down(Key::Down, Modifiers::default())?;
    if let Some(host) = s.host_mut() {
        host.finish_animation();
    }
    s.process_host_events()?;
    print_window(&s);

    let stats = s.pool_stats();
    println!(
        "pool: created={} in_use={} reused={}",
        stats.total_created, stats.items_in_use, stats.reuse_count
    );
    let structure_changes = s
        .take_events()
        .iter()
        .filter(|e| matches!(e, SelectorEvent::AutomationStructureChanged))
        .count();
    println!("structure changes queued: {structure_changes}");
    Ok(())
}
