use criterion::{criterion_group, criterion_main, Criterion};
use kbdforge::layouts::KnownLayout;
use kbdforge::{parse, serialize, Action, Keymap};
use std::hint::black_box;

/// A full-size keymap with a few busy layers, the shape real configs tend to have.
fn setup_keymap() -> Keymap {
    let layout = KnownLayout::AnsiFull.build().expect("Failed to build layout");
    let mut keymap = Keymap::from_layout(&layout);
    let keys: Vec<String> = keymap.defsrc().to_vec();

    for layer in ["nav", "sym", "num"] {
        keymap.add_layer(layer).expect("Failed to add layer");
        for (i, key) in keys.iter().enumerate() {
            let action = match i % 3 {
                0 => Action::basic(key.clone()),
                1 => Action::tap_hold(Action::basic(key.clone()), Action::basic("lctl"), 200),
                _ => Action::LayerWhileHeld("base".into()),
            };
            keymap.set_action(layer, i, action).expect("Failed to set action");
        }
    }
    keymap
        .add_alias("cap", Action::tap_hold(Action::basic("esc"), Action::basic("lctl"), 200))
        .expect("Failed to add alias");
    keymap
}

fn criterion_benchmark(c: &mut Criterion) {
    let keymap = setup_keymap();
    let text = serialize(&keymap);

    c.bench_function("parse (ansi-full, 4 layers)", |b| {
        b.iter(|| parse(black_box(&text)))
    });
    c.bench_function("serialize (ansi-full, 4 layers)", |b| {
        b.iter(|| serialize(black_box(&keymap)))
    });
    c.bench_function("move_key (ansi-full, 4 layers)", |b| {
        b.iter(|| kbdforge::reorder::move_key(black_box(&keymap), "esc", "kp."))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
