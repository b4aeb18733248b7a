use arbora_core::model::{Entity, EntityStats};
use arbora_core::{SceneOptions, TreeConfig, layout_scene};
use arbora_render::{SvgRenderOptions, render_scene_svg};

fn entity(id: &str, progress: f64, overdue: u32) -> Entity {
    Entity {
        id: id.to_string(),
        progress,
        stats: EntityStats {
            done: 0,
            total: 0,
            overdue,
        },
    }
}

fn scene() -> arbora_core::SceneLayout {
    let entities = vec![
        entity("tech", 65.0, 1),
        entity("hr", 20.0, 0),
        entity("piano", 100.0, 0),
    ];
    layout_scene(&entities, &SceneOptions {
        elapsed_fraction: 0.6,
        config: TreeConfig::default(),
    })
    .expect("layout ok")
}

#[test]
fn svg_has_one_ribbon_path_per_branch() {
    let scene = scene();
    let svg = render_scene_svg(&scene, &SvgRenderOptions::default());

    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    let ribbons = svg.matches("class=\"branch\"").count();
    assert_eq!(ribbons, scene.branches.len());
    // Full completion shows up as exactly one fruit group.
    assert_eq!(svg.matches("class=\"fruit\"").count(), 1);
}

#[test]
fn svg_is_deterministic() {
    let scene = scene();
    let a = render_scene_svg(&scene, &SvgRenderOptions::default());
    let b = render_scene_svg(&scene, &SvgRenderOptions::default());
    assert_eq!(a, b);
}

#[test]
fn spines_and_labels_are_toggleable() {
    let scene = scene();
    let bare = render_scene_svg(&scene, &SvgRenderOptions {
        include_spines: false,
        include_labels: false,
        ..SvgRenderOptions::default()
    });
    assert_eq!(bare.matches("class=\"spine\"").count(), 0);
    assert!(!bare.contains("<text"));

    let debug = render_scene_svg(&scene, &SvgRenderOptions {
        include_spines: true,
        ..SvgRenderOptions::default()
    });
    assert_eq!(debug.matches("class=\"spine\"").count(), scene.branches.len());
    assert!(debug.contains("health 62%"));
}

#[test]
fn entity_ids_are_xml_escaped() {
    let entities = vec![entity("r&d <core>", 50.0, 0)];
    let scene = layout_scene(&entities, &SceneOptions {
        elapsed_fraction: 0.5,
        config: TreeConfig::default(),
    })
    .expect("layout ok");
    let svg = render_scene_svg(&scene, &SvgRenderOptions::default());
    assert!(svg.contains("r&amp;d &lt;core&gt;"));
    assert!(!svg.contains("r&d <core>"));
}

#[test]
fn viewbox_includes_padding() {
    let scene = scene();
    let svg = render_scene_svg(&scene, &SvgRenderOptions {
        viewbox_padding: 10.0,
        ..SvgRenderOptions::default()
    });
    assert!(svg.contains("viewBox=\"-10 -10 1020 720\""));
}
