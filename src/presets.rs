//! Built-in example puzzles.

/// The default dial puzzle in `moduli|operations|initial` form.
pub const DEFAULT_DIAL: &str = "4656|000112010310|0440";

/// The default rolling-cuboid grid: a 1x3 bar that has to sweep a field of
/// special tiles.
pub const DEFAULT_GRID: &str = "\
1xxxhhxxx
1xxxhhxxx
1xxxhhxxx
hhhhhhhhh
hhhhhhhhh
hxxxhhhhh
hxxxhhhhh
hhhhhhhhh";

/// A cuboid preset with a name usable from the command line.
#[derive(Clone, Copy, Debug)]
pub struct GridPreset {
    pub name: &'static str,
    pub description: &'static str,
    pub grid: &'static str,
}

/// Named cuboid grids.
pub const GRID_PRESETS: &[GridPreset] = &[
    GridPreset {
        name: "default",
        description: "bar sweeping a field of special tiles",
        grid: DEFAULT_GRID,
    },
    GridPreset {
        name: "column",
        description: "a standing column rolls across two tile columns",
        grid: "1hh\n1hh\n1hh",
    },
    GridPreset {
        name: "walled",
        description: "a cube boxed in by walls, unsolvable",
        grid: "1xh\nxxx\nxxx",
    },
    GridPreset {
        name: "tower",
        description: "a tall block lies down on a goal slot",
        grid: "2..\n.gg",
    },
    GridPreset {
        name: "pair",
        description: "two cubes each settle on their own goal",
        grid: "1g.g1",
    },
];

/// Looks up a named cuboid grid.
pub fn grid_preset(name: &str) -> Option<&'static GridPreset> {
    GRID_PRESETS.iter().find(|preset| preset.name == name)
}
