use canopy_document::{Vector2, Vector3};

/// Runtime kind of a node built without a template.
///
/// `base` is the built-in type the scene constructs, `behavior` names the
/// logic attached on top of it. They are equal for plain built-in nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeKind {
    pub behavior: String,
    pub base: String,
}

impl NodeKind {
    pub fn new(behavior: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            behavior: behavior.into(),
            base: base.into(),
        }
    }

    /// A built-in node with no extra behavior
    pub fn builtin(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            behavior: base.clone(),
            base,
        }
    }

    pub fn has_behavior(&self) -> bool {
        self.behavior != self.base
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node2DState {
    pub visible: bool,
    pub position: Vector2,
    pub rotation: f32,
    pub scale: Vector2,
    pub z_index: i32,
    pub z_is_relative: bool,
    pub y_sort_enabled: bool,
    pub visibility_layer: u32,
}

impl Default for Node2DState {
    fn default() -> Self {
        Self {
            visible: true,
            position: Vector2::ZERO,
            rotation: 0.0,
            scale: Vector2::ONE,
            z_index: 0,
            z_is_relative: true,
            y_sort_enabled: false,
            visibility_layer: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node3DState {
    pub visible: bool,
    pub position: Vector3,
    pub rotation: Vector3,
    pub scale: Vector3,
}

impl Default for Node3DState {
    fn default() -> Self {
        Self {
            visible: true,
            position: Vector3::ZERO,
            rotation: Vector3::ZERO,
            scale: Vector3::ONE,
        }
    }
}

/// Physics layers of a 2D or 3D collision object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionObjectState {
    pub layer: u32,
    pub mask: u32,
}

impl Default for CollisionObjectState {
    fn default() -> Self {
        Self { layer: 1, mask: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Two,
    Three,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    Capsule { radius: f32, height: f32 },
    Rectangle { size: Vector2 },
    Sphere { radius: f32 },
    Box { size: Vector3 },
    Cylinder { radius: f32, height: f32 },
}

impl Shape {
    /// Wire token for this shape
    pub fn token(&self) -> &'static str {
        match self {
            Shape::Circle { .. } => "Cir",
            Shape::Capsule { .. } => "Cap",
            Shape::Rectangle { .. } => "Rec",
            Shape::Sphere { .. } => "Sphere",
            Shape::Box { .. } => "Box",
            Shape::Cylinder { .. } => "Cyl",
        }
    }

    /// Whether a collision shape of `dimension` can hold this shape
    pub fn fits(&self, dimension: Dimension) -> bool {
        match self {
            Shape::Capsule { .. } => true,
            Shape::Circle { .. } | Shape::Rectangle { .. } => dimension == Dimension::Two,
            Shape::Sphere { .. } | Shape::Box { .. } | Shape::Cylinder { .. } => {
                dimension == Dimension::Three
            }
        }
    }
}

/// The shape slot of a collision shape node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionShapeState {
    pub dimension: Dimension,
    pub shape: Option<Shape>,
}

impl CollisionShapeState {
    pub fn empty(dimension: Dimension) -> Self {
        Self {
            dimension,
            shape: None,
        }
    }
}
