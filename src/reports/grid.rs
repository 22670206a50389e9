use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use kbdforge::geometry::PhysicalLayout;
use kbdforge::keycodes::action_label;
use kbdforge::keymap::Keymap;
use std::collections::HashSet;

/// Prints one layer laid out along the rows of a physical layout.
///
/// Layout keys missing from `defsrc` are left blank. `defsrc` keys the layout does not
/// have are listed in an extra trailing row.
pub fn print_layer(keymap: &Keymap, layer: &str, layout: &PhysicalLayout) {
    let Some(actions) = keymap.layer(layer) else {
        return;
    };
    println!("\nLayer: {} ({})", layer, layout.name);

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let mut placed = HashSet::new();
    for row in layout.rows() {
        let cells: Vec<Cell> = row
            .iter()
            .map(|key| {
                let label = match keymap.key_index(&key.id) {
                    Some(i) => {
                        placed.insert(i);
                        action_label(&actions[i])
                    }
                    None => " ".to_string(),
                };
                Cell::new(label).set_alignment(CellAlignment::Center)
            })
            .collect();
        table.add_row(cells);
    }

    let unplaced: Vec<Cell> = (0..keymap.len())
        .filter(|i| !placed.contains(i))
        .map(|i| {
            Cell::new(format!("{}: {}", keymap.defsrc()[i], action_label(&actions[i])))
                .set_alignment(CellAlignment::Center)
        })
        .collect();
    if !unplaced.is_empty() {
        table.add_row(unplaced);
    }

    println!("{}", table);
}
