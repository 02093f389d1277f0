pub mod hit;
pub mod paint;

pub use hit::{
    HandleHit, element_aabb, handle_points, hit_handle, hit_test, hit_test_rect, rotate_handle_point,
};
pub use paint::{DrawCmd, DrawList, Overlay, Painter, Stroke, TextRun, paint_document, shape_outline};
