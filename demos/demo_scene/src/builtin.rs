use canopy_shared::{CollisionObjectState, CollisionShapeState, Dimension, Node2DState, Node3DState};

/// Capabilities a built-in node type starts with
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Capabilities {
    pub node_2d: Option<Node2DState>,
    pub node_3d: Option<Node3DState>,
    pub collision_object: Option<CollisionObjectState>,
    pub collision_shape: Option<CollisionShapeState>,
}

impl Capabilities {
    fn plain_2d() -> Self {
        Self {
            node_2d: Some(Node2DState::default()),
            ..Self::default()
        }
    }

    fn plain_3d() -> Self {
        Self {
            node_3d: Some(Node3DState::default()),
            ..Self::default()
        }
    }

    fn with_collision(mut self) -> Self {
        self.collision_object = Some(CollisionObjectState::default());
        self
    }

    fn with_shape(mut self, dimension: Dimension) -> Self {
        self.collision_shape = Some(CollisionShapeState::empty(dimension));
        self
    }
}

/// `None` for types the arena cannot build
pub(crate) fn capabilities(base: &str) -> Option<Capabilities> {
    let capabilities = match base {
        "Node" => Capabilities::default(),
        "Node2D" | "Sprite2D" | "Camera2D" => Capabilities::plain_2d(),
        "Node3D" | "MeshInstance3D" | "Camera3D" => Capabilities::plain_3d(),
        "CharacterBody2D" | "StaticBody2D" | "RigidBody2D" | "Area2D" => {
            Capabilities::plain_2d().with_collision()
        }
        "CharacterBody3D" | "StaticBody3D" | "RigidBody3D" | "Area3D" => {
            Capabilities::plain_3d().with_collision()
        }
        "CollisionShape2D" => Capabilities::plain_2d().with_shape(Dimension::Two),
        "CollisionShape3D" => Capabilities::plain_3d().with_shape(Dimension::Three),
        _ => return None,
    };
    Some(capabilities)
}
