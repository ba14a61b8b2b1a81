//! Minimal host loop: build a page, open the modal, let the entrance
//! animation finish in real time, then dismiss it with Escape.

use std::time::Duration;

use modal_dom::{Document, ElementKind, Key, MonotonicClock};
use modal_window::{ModalWindow, Phase};

fn main() {
    let mut doc = Document::new();

    let trigger = doc.create_element(ElementKind::Button);
    doc.set_text(trigger, "Open Modal");
    doc.append_child(doc.body(), trigger);

    let host = doc.create_element(ElementKind::Container);
    doc.append_child(doc.body(), host);
    let heading = doc.create_element(ElementKind::Heading(2));
    doc.set_text(heading, "Demo Modal");
    doc.append_child(host, heading);
    let para = doc.create_element(ElementKind::Paragraph);
    doc.set_text(para, "Press Escape to dismiss.");
    doc.append_child(host, para);

    let mut modal = ModalWindow::new(host);
    modal.attach(&mut doc);

    doc.focus(trigger);
    pump(&mut doc, &mut modal);

    modal.open(&mut doc);
    println!("opened: active={:?}", doc.attr(host, "active"));

    // Drive the animation window from wall time.
    let mut clock = MonotonicClock::new();
    while modal.phase() != Phase::Open {
        std::thread::sleep(Duration::from_millis(10));
        for id in doc.advance(clock.tick()) {
            modal.handle_timer(&mut doc, id);
        }
        pump(&mut doc, &mut modal);
    }
    println!("settled: focus on dialog = {:?}", doc.focused());

    doc.key_down(Key::Escape);
    pump(&mut doc, &mut modal);
    while modal.phase() != Phase::Closed {
        std::thread::sleep(Duration::from_millis(10));
        for id in doc.advance(clock.tick()) {
            modal.handle_timer(&mut doc, id);
        }
        pump(&mut doc, &mut modal);
    }

    println!("closed: active={:?}", doc.attr(host, "active"));
    println!("focus restored to trigger = {}", doc.focused() == Some(trigger));
    println!("events: {:?}", modal.take_events());
}

fn pump(doc: &mut Document, modal: &mut ModalWindow) {
    loop {
        doc.run_frame();
        let events = doc.take_events();
        if events.is_empty() && doc.pending_frames() == 0 {
            break;
        }
        for event in events {
            modal.handle_event(doc, &event);
        }
    }
}
