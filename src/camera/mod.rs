/// Camera module
///
/// - camera_data.rs: data structures, no methods
/// - camera_operations.rs: pure functions that operate on the data
pub mod camera_data;
pub mod camera_operations;

// Re-export data structures
pub use camera_data::{CameraConfig, CameraData, CameraUniform};

// Re-export all operations
pub use camera_operations::{
    // Initialization
    init_camera,

    // Mutation
    move_local,
    rotate_by,
    set_orientation,
    set_position,
    set_projection,
    translate,

    // Derived matrices
    build_camera_uniform,
    calc_frustum,
    rotation_matrix,
    view_projection,

    // Visibility tests
    is_any_inside_frustum,
    is_inside_frustum,

    // Diagnostics
    log_camera_context,
};
