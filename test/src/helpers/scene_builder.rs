use canopy_demo_scene::{demo_library, ArenaScene, NodeId, TemplateLibrary, TemplateNode};
use canopy_shared::{SceneMut, SceneRef, Vector2};

pub const OBJ_PATH: &str = "scenes/Obj.tscn";

/// The demo templates plus a small `Obj` template with one embedded child
pub fn snapshot_library() -> TemplateLibrary {
    let mut library = demo_library();
    library.register_template(
        OBJ_PATH,
        TemplateNode::builtin("Obj", "Node2D").with_child(TemplateNode::builtin("Body", "Sprite2D")),
    );
    library
}

/// Spawns a free-form `Node2D` named `name` under `parent` at `(x, y)`
pub fn node_2d_at(scene: &mut ArenaScene, parent: NodeId, name: &str, x: f32, y: f32) -> NodeId {
    let node = match scene.spawn(parent, name, "Node2D") {
        Ok(node) => node,
        Err(error) => panic!("failed to spawn '{}': {}", name, error),
    };
    let mut state = scene.node_2d(node).unwrap_or_default();
    state.position = Vector2::new(x, y);
    scene.set_node_2d(node, state);
    node
}
