//! Side-by-side statistics of an input scene and its simplified version.

use crate::resources::AttributeKind;
use crate::scene::Scene;
use crate::scene_utils::instances::{
    compute_all_instances, num_att_entries_on_base_meshes, num_att_entries_on_instanced_meshes,
    num_faces_on_base_meshes, num_faces_on_instanced_meshes, num_mesh_instances,
    num_points_on_base_meshes, num_points_on_instanced_meshes,
};

/// Base and instanced counts of one quantity for one scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Counts {
    base: usize,
    instanced: usize,
}

impl Counts {
    fn of(
        scene: &Scene,
        base: impl Fn(&Scene) -> usize,
        instanced: impl Fn(&Scene) -> usize,
    ) -> Self {
        Self {
            base: base(scene),
            instanced: instanced(scene),
        }
    }
}

/// Table layout shared by every row of one report.
struct InfoTable {
    show_instanced: bool,
    out: String,
}

impl InfoTable {
    /// Instanced columns are shown when a base mesh has other than exactly
    /// one instance, or when simplification changed the base mesh count.
    fn new(input: &Scene, simplified: &Scene) -> Self {
        let a = num_mesh_instances(input);
        let b = num_mesh_instances(simplified);
        let show_instanced =
            a.len() != b.len() || a.iter().zip(b.iter()).any(|(&x, &y)| x != 1 || y != 1);
        Self {
            show_instanced,
            out: String::new(),
        }
    }

    fn header(&mut self) {
        self.out.push('\n');
        self.out.push_str(&format!("{:>21} |   geometry:         base", ""));
        if self.show_instanced {
            self.out.push_str("    instanced");
        }
        self.out.push('\n');
    }

    /// Rows with nothing to report for the input are skipped.
    fn row(&mut self, label: &str, input: Counts, simplified: Counts) {
        if input.base == 0 && input.instanced == 0 {
            return;
        }
        self.out.push_str("  ----------------------------------------------");
        if self.show_instanced {
            self.out.push_str("-------------");
        }
        self.out.push('\n');
        self.cells(label, "input", input);
        self.cells("", "simplified", simplified);
    }

    fn cells(&mut self, label: &str, which: &str, counts: Counts) {
        self.out.push_str(&format!("{label:>21} | {which:>10}: {:>12}", counts.base));
        if self.show_instanced {
            self.out.push_str(&format!(" {:>12}", counts.instanced));
        }
        self.out.push('\n');
    }
}

/// Renders the comparison table. Only face counts are listed unless
/// `verbose`, which adds meshes, points, positions, normals, colors and
/// materials.
#[must_use]
pub fn format_info(input: &Scene, simplified: &Scene, verbose: bool) -> String {
    let mut table = InfoTable::new(input, simplified);
    table.header();

    let meshes = |s: &Scene| Counts::of(s, Scene::num_meshes, |s| compute_all_instances(s).len());
    let faces = |s: &Scene| Counts::of(s, num_faces_on_base_meshes, num_faces_on_instanced_meshes);
    let points =
        |s: &Scene| Counts::of(s, num_points_on_base_meshes, num_points_on_instanced_meshes);
    let entries = |s: &Scene, kind: AttributeKind| {
        Counts::of(
            s,
            |s| num_att_entries_on_base_meshes(s, kind),
            |s| num_att_entries_on_instanced_meshes(s, kind),
        )
    };

    if verbose {
        table.row("Number of meshes", meshes(input), meshes(simplified));
    }
    table.row("Number of faces", faces(input), faces(simplified));
    if verbose {
        table.row("Number of points", points(input), points(simplified));
        for (label, kind) in [
            ("Number of positions", AttributeKind::Position),
            ("Number of normals", AttributeKind::Normal),
            ("Number of colors", AttributeKind::Color),
        ] {
            table.row(label, entries(input, kind), entries(simplified, kind));
        }
        // Both lines compare library sizes: input, then simplified.
        let materials = Counts {
            base: input.material_library().num_materials(),
            instanced: simplified.material_library().num_materials(),
        };
        table.row("Number of materials", materials, materials);
    }
    table.out
}

/// Logs [`format_info`] line by line at info level.
pub fn print_info(input: &Scene, simplified: &Scene, verbose: bool) {
    for line in format_info(input, simplified, verbose).lines() {
        log::info!("{line}");
    }
}
