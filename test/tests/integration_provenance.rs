/// Descriptors keep track of where a node came from, and rebuild it the
/// same way.

use canopy_demo_scene::{ArenaScene, LEVEL_PATH};
use canopy_shared::{
    apply_descriptor, collect_added, collect_everything, collect_subtree, keys, ApplyReport,
    Provenance, SceneMut, SceneRef, Vector2,
};
use canopy_test::{node_2d_at, snapshot_library, OBJ_PATH};

fn level() -> ArenaScene {
    ArenaScene::with_level(snapshot_library(), LEVEL_PATH).unwrap()
}

#[test]
fn embedded_child_without_full_state_has_no_data() {
    let scene = level();
    let root = scene.root();
    let world = scene.find(root, "World").unwrap();

    let descriptor = collect_subtree(&scene, Some(root), world, false).unwrap();
    assert_eq!(descriptor.provenance, Provenance::Embedded);
    assert!(descriptor.state.is_none());

    let document = descriptor.to_document();
    assert!(document.get(keys::DATA).is_none());
    let floor = &document[keys::CHILDREN][0usize];
    assert_eq!(floor[keys::NAME].as_str(), "Floor");
    assert!(floor.get(keys::DATA).is_none());
}

#[test]
fn embedded_child_with_full_state_carries_data() {
    let scene = level();
    let root = scene.root();
    let world = scene.find(root, "World").unwrap();

    let descriptor = collect_subtree(&scene, Some(root), world, true).unwrap();
    assert!(descriptor.state.is_some());
}

#[test]
fn ignored_nodes_are_left_out_of_the_snapshot() {
    let scene = level();
    let names: Vec<String> = collect_everything(&scene)
        .into_iter()
        .map(|descriptor| descriptor.name)
        .collect();
    assert_eq!(names, vec!["World".to_string(), "Spawn".to_string()]);
}

#[test]
fn template_instance_rebuilds_with_name_and_state() {
    let mut source = ArenaScene::new("Root", snapshot_library());
    let root = source.root();
    let obj = source.spawn_template(root, OBJ_PATH, "Thing").unwrap();
    let mut state = source.node_2d(obj).unwrap();
    state.position = Vector2::new(3.0, -4.0);
    state.rotation = 0.5;
    source.set_node_2d(obj, state);

    let descriptor = collect_added(&source, obj).unwrap();
    assert_eq!(
        descriptor.provenance,
        Provenance::Template {
            path: OBJ_PATH.to_string()
        }
    );

    let mut target = ArenaScene::new("Root", snapshot_library());
    let target_root = target.root();
    let mut report = ApplyReport::new();
    let built = apply_descriptor(&mut target, None, target_root, &descriptor, false, &mut report)
        .unwrap();
    target.add_child(target_root, built);

    assert!(report.is_clean());
    assert_eq!(target.name(built), "Thing");
    assert_eq!(target.template_path(built), Some(OBJ_PATH));
    assert_eq!(target.node_2d(built), Some(state));
    assert!(target.find(built, "Body").is_some());
}

#[test]
fn free_form_node_keeps_its_kind() {
    let mut source = ArenaScene::new("Root", snapshot_library());
    let root = source.root();
    let node = node_2d_at(&mut source, root, "Marker", 1.0, 1.0);

    let descriptor = collect_added(&source, node).unwrap();
    let Provenance::FreeForm { kind } = &descriptor.provenance else {
        panic!("expected a free-form descriptor");
    };
    assert_eq!(kind.base, "Node2D");
    assert!(!kind.has_behavior());
}
