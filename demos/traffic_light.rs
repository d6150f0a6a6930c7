//! Traffic Light State Machine
//!
//! This example demonstrates a hierarchical state machine.
//!
//! Key concepts:
//! - Composite states with initial substates
//! - Events bubbling from the active light to the controller
//! - External self-transitions that restart a whole region
//! - Finishing the machine through the Final pseudo-state
//!
//! Run with: RUST_LOG=hsm=trace cargo run --example traffic_light

use hsm::builder::StateTreeBuilder;
use hsm::core::{HandlerTable, Handling};
use hsm::engine::{Machine, Progress};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Signal {
    Timer,
    Fault,
    Repair,
    Restart,
    Shutdown,
}

#[derive(Default)]
struct Lamp {
    lit: Vec<&'static str>,
}

fn lamp(colour: &'static str) -> HandlerTable<Lamp, Signal> {
    HandlerTable::new().on_entry(move |lamp: &mut Lamp| {
        println!("  [{colour} on]");
        lamp.lit.push(colour);
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== Traffic Light State Machine ===\n");

    // root
    // └── powered
    //     ├── cycling
    //     │   ├── red
    //     │   ├── green
    //     │   └── yellow
    //     └── flashing
    let mut builder = StateTreeBuilder::with_root("root", HandlerTable::new());
    let root = builder.root();
    let powered = builder.add_handler(root, "powered", HandlerTable::new());
    let cycling = builder.add_handler(powered, "cycling", HandlerTable::new());
    let red = builder.add_handler(cycling, "red", HandlerTable::new());
    let green = builder.add_handler(cycling, "green", HandlerTable::new());
    let yellow = builder.add_handler(cycling, "yellow", HandlerTable::new());
    let flashing = builder.add_handler(powered, "flashing", HandlerTable::new());

    builder.set_handler(root, HandlerTable::new().initial(powered));
    builder.set_handler(
        powered,
        HandlerTable::new()
            .initial(cycling)
            .on(Signal::Fault, move |_, _| Handling::transition(flashing))
            .on(Signal::Shutdown, |_, _| Handling::finish()),
    );
    builder.set_handler(
        cycling,
        HandlerTable::new()
            .initial(red)
            .on_exit(|_| println!("  [cycle interrupted]"))
            .on(Signal::Restart, move |_, _| Handling::external(cycling)),
    );
    builder.set_handler(
        red,
        lamp("red").on(Signal::Timer, move |_, _| Handling::transition(green)),
    );
    builder.set_handler(
        green,
        lamp("green").on(Signal::Timer, move |_, _| Handling::transition(yellow)),
    );
    builder.set_handler(
        yellow,
        lamp("yellow").on(Signal::Timer, move |_, _| Handling::transition(red)),
    );
    builder.set_handler(
        flashing,
        lamp("amber (flashing)").on(Signal::Repair, move |_, _| Handling::transition(cycling)),
    );

    let tree = Arc::new(builder.build()?);
    let mut machine = Machine::builder(Arc::clone(&tree))
        .name("junction-1")
        .context(Lamp::default())
        .journal(true)
        .build()?;

    println!("Starting:");
    machine.start()?;

    let script = [
        Signal::Timer,
        Signal::Timer,
        Signal::Restart,
        Signal::Timer,
        Signal::Fault,
        Signal::Timer,
        Signal::Repair,
        Signal::Shutdown,
    ];

    for signal in script {
        println!("\n{signal:?} (in {})", machine.current_name().unwrap_or("?"));
        if machine.handle_event(signal)? == Progress::Finished {
            println!("  [powered down]");
        }
    }

    println!("\nLamps lit: {}", machine.context().lit.join(" -> "));
    if let Some(journal) = machine.journal() {
        println!("Journal recorded {} actions", journal.len());
    }

    println!("\nKey Characteristics:");
    println!("- Lights only know their successor; faults are handled once in 'powered'");
    println!("- Restart re-enters 'cycling' and begins again at red");
    println!("- Timer is ignored while flashing because nothing handles it");

    println!("\n=== Example Complete ===");
    Ok(())
}
