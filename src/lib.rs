//! Canvas editing engine for the form designer.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! interactive editing of a form page: translating raw pointer and key events
//! into element moves, resizes and rotations, snapping them to the grid, the
//! canvas centre and evenly spaced neighbours, and recording every committed
//! change into a bounded undo/redo history. The host JavaScript layer renders
//! the document and applies the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine, input dispatcher and testable [`engine::EngineCore`] |
//! | [`doc`] | Form elements, page sizes and the ordered document |
//! | [`selection`] | Multi-selection stored as element flags |
//! | [`geometry`] | Points, rects, grid snap, canvas clamp, pointer mapping |
//! | [`guides`] | Centre and equal-spacing alignment guides |
//! | [`hit`] | Hit-testing of bodies, resize handles and the rotate grip |
//! | [`drag`] | Drag controller |
//! | [`resize`] | Resize controller |
//! | [`rotate`] | Rotation controller |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`history`] | Snapshot-based undo/redo |
//! | [`config`] | Tunable thresholds with environment overrides |
//! | [`consts`] | Shared numeric constants (grid, thresholds, minimum sizes, etc.) |

pub mod config;
pub mod consts;
pub mod doc;
pub mod drag;
pub mod engine;
pub mod geometry;
pub mod guides;
pub mod hit;
pub mod history;
pub mod input;
pub mod resize;
pub mod rotate;
pub mod selection;
