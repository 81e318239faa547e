use canopy_document::Value;

use crate::{
    keys,
    replication::error::ReplicationError,
    scene::{
        scene_traits::{SceneMut, SceneRef},
        state::{CollisionObjectState, Dimension, Node2DState, Node3DState, Shape},
    },
};

/// Captures the primitive state of every capability `node` has, plus its
/// groups
pub fn capture_state<S: SceneRef>(scene: &S, node: S::Node) -> Value {
    let mut data = Value::object();

    if let Some(state) = scene.node_2d(node) {
        data[keys::VISIBLE].set(state.visible);
        data[keys::Z_IS_RELATIVE].set(state.z_is_relative);
        data[keys::Y_SORT_ENABLED].set(state.y_sort_enabled);
        data[keys::Z_INDEX].set(state.z_index);
        data[keys::POSITION].set(state.position);
        data[keys::ROTATION].set(state.rotation);
        data[keys::SCALE].set(state.scale);
        data[keys::VISIBILITY_LAYER].set(state.visibility_layer);
    }

    if let Some(state) = scene.node_3d(node) {
        data[keys::VISIBLE].set(state.visible);
        data[keys::POSITION].set(state.position);
        data[keys::ROTATION].set(state.rotation);
        data[keys::SCALE].set(state.scale);
    }

    if let Some(state) = scene.collision_object(node) {
        data[keys::COLLISION_LAYER].set(state.layer);
        data[keys::COLLISION_MASK].set(state.mask);
    }

    if let Some(shape) = scene.collision_shape(node).and_then(|slot| slot.shape) {
        write_shape(&mut data, &shape);
    }

    for group in scene.groups(node) {
        data[keys::GROUP].append(group);
    }

    data
}

fn write_shape(data: &mut Value, shape: &Shape) {
    data[keys::SHAPE].set(shape.token());
    match *shape {
        Shape::Circle { radius } | Shape::Sphere { radius } => {
            data[keys::RADIUS].set(radius);
        }
        Shape::Capsule { radius, height } | Shape::Cylinder { radius, height } => {
            data[keys::RADIUS].set(radius);
            data[keys::HEIGHT].set(height);
        }
        Shape::Rectangle { size } => data[keys::SIZE].set(size),
        Shape::Box { size } => data[keys::SIZE].set(size),
    }
}

/// Reads the shape stored in `data` for a collision shape of `dimension`.
/// A missing token means no shape.
pub fn read_shape(data: &Value, dimension: Dimension) -> Result<Option<Shape>, String> {
    let radius = data[keys::RADIUS].as_float();
    let height = data[keys::HEIGHT].as_float();

    let shape = match (dimension, data[keys::SHAPE].as_str()) {
        (_, "") => return Ok(None),
        (_, "Cap") => Shape::Capsule { radius, height },
        (Dimension::Two, "Cir") => Shape::Circle { radius },
        (Dimension::Two, "Rec" | "Rect") => Shape::Rectangle {
            size: data[keys::SIZE].as_vector2(),
        },
        (Dimension::Three, "Sphere") => Shape::Sphere { radius },
        (Dimension::Three, "Box") => Shape::Box {
            size: data[keys::SIZE].as_vector3(),
        },
        (Dimension::Three, "Cyl") => Shape::Cylinder { radius, height },
        (_, token) => return Err(token.to_string()),
    };

    Ok(Some(shape))
}

/// Writes `data` onto every capability `node` has, then adds its groups.
///
/// Missing keys fall back to the zero value of their field. The shape is
/// decoded before anything is written, so an unknown token leaves the node
/// untouched.
pub fn apply_state<S: SceneMut>(
    scene: &mut S,
    node: S::Node,
    data: &Value,
) -> Result<(), ReplicationError> {
    let shape = match scene.collision_shape(node) {
        Some(slot) => Some(read_shape(data, slot.dimension).map_err(|token| {
            ReplicationError::UnknownShape {
                token,
                node: scene.name(node).to_string(),
            }
        })?),
        None => None,
    };

    if scene.node_2d(node).is_some() {
        scene.set_node_2d(
            node,
            Node2DState {
                visible: data[keys::VISIBLE].as_bool(),
                position: data[keys::POSITION].as_vector2(),
                rotation: data[keys::ROTATION].as_float(),
                scale: data[keys::SCALE].as_vector2(),
                z_index: data[keys::Z_INDEX].as_int(),
                z_is_relative: data[keys::Z_IS_RELATIVE].as_bool(),
                y_sort_enabled: data[keys::Y_SORT_ENABLED].as_bool(),
                visibility_layer: data[keys::VISIBILITY_LAYER].as_uint(),
            },
        );
    }

    if scene.node_3d(node).is_some() {
        scene.set_node_3d(
            node,
            Node3DState {
                visible: data[keys::VISIBLE].as_bool(),
                position: data[keys::POSITION].as_vector3(),
                rotation: data[keys::ROTATION].as_vector3(),
                scale: data[keys::SCALE].as_vector3(),
            },
        );
    }

    if scene.collision_object(node).is_some() {
        scene.set_collision_object(
            node,
            CollisionObjectState {
                layer: data[keys::COLLISION_LAYER].as_uint(),
                mask: data[keys::COLLISION_MASK].as_uint(),
            },
        );
    }

    if let Some(shape) = shape {
        scene.set_shape(node, shape);
    }

    for group in data[keys::GROUP].as_array() {
        let group = group.as_str();
        if !group.is_empty() && !scene.is_in_group(node, group) {
            scene.add_to_group(node, group);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use canopy_document::{Value, Vector2, Vector3};

    use super::read_shape;
    use crate::{
        keys,
        scene::state::{Dimension, Shape},
    };

    #[test]
    fn missing_token_is_no_shape() {
        assert_eq!(read_shape(&Value::object(), Dimension::Two), Ok(None));
    }

    #[test]
    fn rectangle_accepts_both_tokens() {
        for token in ["Rec", "Rect"] {
            let mut data = Value::object();
            data[keys::SHAPE].set(token);
            data[keys::SIZE].set(Vector2::new(4.0, 2.0));
            assert_eq!(
                read_shape(&data, Dimension::Two),
                Ok(Some(Shape::Rectangle {
                    size: Vector2::new(4.0, 2.0)
                }))
            );
        }
    }

    #[test]
    fn tokens_are_checked_against_dimension() {
        let mut data = Value::object();
        data[keys::SHAPE].set("Box");
        data[keys::SIZE].set(Vector3::ONE);

        assert_eq!(
            read_shape(&data, Dimension::Three),
            Ok(Some(Shape::Box { size: Vector3::ONE }))
        );
        assert_eq!(read_shape(&data, Dimension::Two), Err("Box".to_string()));
    }

    #[test]
    fn capsule_fits_both_dimensions() {
        let mut data = Value::object();
        data[keys::SHAPE].set("Cap");
        data[keys::RADIUS].set(0.5f32);
        data[keys::HEIGHT].set(2.0f32);

        let capsule = Some(Shape::Capsule {
            radius: 0.5,
            height: 2.0,
        });
        assert_eq!(read_shape(&data, Dimension::Two), Ok(capsule));
        assert_eq!(read_shape(&data, Dimension::Three), Ok(capsule));
    }
}
