use canopy_shared::{keys, NodeKind, Shape, Vector2};

use crate::library::{TemplateLibrary, TemplateNode};

pub const LEVEL_PATH: &str = "levels/Game.tscn";
pub const PLAYER_PATH: &str = "scenes/Player.tscn";
pub const CRATE_PATH: &str = "scenes/Crate.tscn";

/// The arena level, the player and a crate prop
pub fn demo_library() -> TemplateLibrary {
    let mut library = TemplateLibrary::new();

    library.register_behavior("scripts/Player.rs");
    library.register_behavior("scripts/Crate.rs");

    library.register_template(
        LEVEL_PATH,
        TemplateNode::builtin("Game", "Node2D")
            .with_child(
                TemplateNode::builtin("World", "Node2D").with_child(
                    TemplateNode::builtin("Floor", "StaticBody2D").with_child(
                        TemplateNode::builtin("FloorShape", "CollisionShape2D").with_shape(
                            Shape::Rectangle {
                                size: Vector2::new(800.0, 40.0),
                            },
                        ),
                    ),
                ),
            )
            .with_child(TemplateNode::builtin("Spawn", "Node2D"))
            .with_child(
                TemplateNode::builtin("Hud", "Node").with_group(keys::NETWORK_IGNORE_GROUP),
            ),
    );

    library.register_template(
        PLAYER_PATH,
        TemplateNode::new("Player", NodeKind::new("Player", "CharacterBody2D"))
            .with_group(keys::PLAYER_GROUP)
            .with_child(
                TemplateNode::builtin("Hitbox", "CollisionShape2D").with_shape(Shape::Capsule {
                    radius: 8.0,
                    height: 24.0,
                }),
            )
            .with_child(TemplateNode::builtin("Sprite", "Sprite2D")),
    );

    library.register_template(
        CRATE_PATH,
        TemplateNode::new("Crate", NodeKind::new("Crate", "RigidBody2D")).with_child(
            TemplateNode::builtin("Shape", "CollisionShape2D").with_shape(Shape::Rectangle {
                size: Vector2::new(16.0, 16.0),
            }),
        ),
    );

    library
}
