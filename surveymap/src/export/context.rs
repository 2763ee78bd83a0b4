//! Export inputs: the selected shape, map style and drawing mode.

use super::error::ExportError;
use crate::geometry::{bounding_box_of, BoundingBox, PolygonRing};
use crate::provider::MapStyle;
use std::sync::{Arc, Mutex};

/// What the user is currently drawing on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawingMode {
    #[default]
    None,
    Polygon,
    Rectangle,
    Distance,
}

/// Callback invoked whenever the drawn shape changes or is cleared.
pub type ShapeChangedCallback = Box<dyn Fn(Option<&PolygonRing>) + Send + Sync>;

/// Interactive map surface that owns drawn shapes.
pub trait MapView: Send + Sync {
    /// Bounds of the visible map area.
    fn viewport_bounds(&self) -> BoundingBox;

    /// Currently drawn shape, if any.
    fn drawn_ring(&self) -> Option<PolygonRing>;

    /// Registers a listener for shape changes.
    fn on_shape_changed(&self, callback: ShapeChangedCallback);
}

/// State an export reads: the selected shape and how to render it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrchestratorContext {
    shape: Option<PolygonRing>,
    style: MapStyle,
    mode: DrawingMode,
}

impl OrchestratorContext {
    pub fn new(style: MapStyle) -> Self {
        Self {
            shape: None,
            style,
            mode: DrawingMode::None,
        }
    }

    pub fn with_shape(mut self, shape: PolygonRing) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Snapshot of `view`'s current shape.
    pub fn from_view(view: &dyn MapView, style: MapStyle) -> Self {
        Self {
            shape: view.drawn_ring(),
            style,
            mode: DrawingMode::None,
        }
    }

    /// Keeps `shared` in step with the shapes drawn on `view`.
    pub fn follow(view: &dyn MapView, shared: Arc<Mutex<OrchestratorContext>>) {
        view.on_shape_changed(Box::new(move |ring| {
            if let Ok(mut ctx) = shared.lock() {
                ctx.shape = ring.cloned();
            }
        }));
    }

    pub fn shape(&self) -> Option<&PolygonRing> {
        self.shape.as_ref()
    }

    pub fn set_shape(&mut self, shape: Option<PolygonRing>) {
        self.shape = shape;
    }

    pub fn style(&self) -> MapStyle {
        self.style
    }

    pub fn set_style(&mut self, style: MapStyle) {
        self.style = style;
    }

    pub fn mode(&self) -> DrawingMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DrawingMode) {
        self.mode = mode;
    }

    /// Bounding box of the selected shape.
    ///
    /// # Errors
    ///
    /// `NoShapeSelected` without a shape, `InvalidShape` for rings that do
    /// not enclose an area.
    pub fn selected_bounds(&self) -> Result<BoundingBox, ExportError> {
        let shape = self.shape.as_ref().ok_or(ExportError::NoShapeSelected)?;
        Ok(bounding_box_of(shape)?)
    }
}

/// [`MapView`] over a fixed viewport, for headless use.
///
/// The shape is set programmatically and listeners are notified on every
/// change.
pub struct StaticMapView {
    viewport: BoundingBox,
    ring: Mutex<Option<PolygonRing>>,
    listeners: Mutex<Vec<ShapeChangedCallback>>,
}

impl StaticMapView {
    pub fn new(viewport: BoundingBox) -> Self {
        Self {
            viewport,
            ring: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Replaces the drawn shape and notifies listeners.
    pub fn set_ring(&self, ring: Option<PolygonRing>) {
        if let Ok(mut current) = self.ring.lock() {
            *current = ring.clone();
        }
        if let Ok(listeners) = self.listeners.lock() {
            for listener in listeners.iter() {
                listener(ring.as_ref());
            }
        }
    }
}

impl MapView for StaticMapView {
    fn viewport_bounds(&self) -> BoundingBox {
        self.viewport
    }

    fn drawn_ring(&self) -> Option<PolygonRing> {
        self.ring.lock().ok().and_then(|ring| ring.clone())
    }

    fn on_shape_changed(&self, callback: ShapeChangedCallback) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(callback);
        }
    }
}
