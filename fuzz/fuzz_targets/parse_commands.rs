#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfdeck::config::Config;
use pdfdeck::pageset::{OrderSpec, PageSet, ReorderPolicy};
use pdfdeck::session::{Command, Session};

fuzz_target!(|data: &[u8]| {
    let s = std::str::from_utf8(data).unwrap_or("");

    // Reorder input never panics, whatever the list length.
    if let Ok(order) = OrderSpec::parse(s) {
        let mut pages = PageSet::new();
        let _ = pages.reorder(&order, ReorderPolicy::Strict);
        let _ = order.validate(order.positions().len(), ReorderPolicy::Lenient);
    }

    // Exports and selects touch the filesystem; everything else runs
    // against an empty session, which must stay empty.
    let mut session = Session::new(&Config::default());
    for line in s.lines() {
        match line.parse::<Command>() {
            Ok(Command::Select { .. } | Command::Export { .. }) | Err(_) => continue,
            Ok(command) => {
                let response = session.execute(command);
                assert!(response.is_ok());
            }
        }
    }
    assert!(session.pages().is_empty());
});
