//! Interactive window that presents a composed figure.
//!
//! Controls: drag to pan, scroll to zoom at the cursor, `R` to reset,
//! `Escape` or the close button to quit.

use std::sync::Arc;

use npyplot_gpu::{
    FigurePipeline, GpuConfig, GpuContext, Texture, TextureConfig, TransformUniform,
};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::error::{Error, Result};
use crate::figure::{Figure, FigureSettings};

/// Zoom factor per scroll notch.
const ZOOM_STEP: f32 = 1.25;
const MIN_ZOOM: f32 = 0.1;
const MAX_ZOOM: f32 = 40.0;

/// Window, GPU and figure settings for one `show` call.
#[derive(Debug, Clone)]
pub struct ViewerSettings {
    pub window_title: String,
    /// Initial window size relative to the figure's pixel size.
    pub window_scale: f32,
    pub figure: FigureSettings,
    pub gpu: GpuConfig,
    pub texture: TextureConfig,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            window_title: "npyplot".to_string(),
            window_scale: 0.75,
            figure: FigureSettings::default(),
            gpu: GpuConfig::default(),
            texture: TextureConfig::default(),
        }
    }
}

impl ViewerSettings {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    /// Logical window size for a figure of the given pixel size.
    pub fn window_size(&self, figure_size: (u32, u32)) -> LogicalSize<f64> {
        let scale = f64::from(self.window_scale.max(0.1));
        LogicalSize::new(
            (f64::from(figure_size.0) * scale).max(200.0),
            (f64::from(figure_size.1) * scale).max(200.0),
        )
    }
}

/// Show `figure` in a window and block until the window is closed.
pub fn show(figure: &Figure, settings: &ViewerSettings) -> Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut viewer = FigureViewer::new(figure, settings);
    event_loop.run_app(&mut viewer)?;

    match viewer.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Pan/zoom state in clip space.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ViewTransform {
    offset_x: f32,
    offset_y: f32,
    zoom: f32,
}

impl ViewTransform {
    fn new() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0,
        }
    }

    fn pan(&mut self, delta_x: f32, delta_y: f32) {
        self.offset_x += delta_x;
        self.offset_y += delta_y;
    }

    /// Zoom so the clip-space point under the cursor stays put.
    fn zoom_at_point(&mut self, cursor_x: f32, cursor_y: f32, zoom_factor: f32) {
        let new_zoom = (self.zoom * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let zoom_ratio = new_zoom / self.zoom;

        self.offset_x -= (cursor_x - self.offset_x) * (zoom_ratio - 1.0);
        self.offset_y -= (cursor_y - self.offset_y) * (zoom_ratio - 1.0);
        self.zoom = new_zoom;
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn to_uniform(self, figure_size: (u32, u32), surface_size: (u32, u32)) -> TransformUniform {
        let (scale_x, scale_y) = TransformUniform::letterbox_scale(figure_size, surface_size);
        TransformUniform::from_view(scale_x, scale_y, self.offset_x, self.offset_y, self.zoom)
    }
}

/// Window position to clip space.
fn to_clip(position: (f64, f64), surface_size: (u32, u32)) -> (f32, f32) {
    let (w, h) = (surface_size.0.max(1) as f64, surface_size.1.max(1) as f64);
    (
        (position.0 / w * 2.0 - 1.0) as f32,
        (1.0 - position.1 / h * 2.0) as f32,
    )
}

#[derive(Default)]
struct InputState {
    dragging: bool,
    cursor: Option<(f64, f64)>,
}

struct GpuState {
    gpu_ctx: GpuContext,
    pipeline: FigurePipeline,
    // Kept alive for the bind group.
    _texture: Texture,
    texture_bind_group: wgpu::BindGroup,
    figure_size: (u32, u32),
}

impl GpuState {
    fn new(window: Arc<Window>, figure: &Figure, settings: &ViewerSettings) -> Result<Self> {
        let gpu_ctx = pollster::block_on(GpuContext::new(window, settings.gpu.clone()))?;
        let pipeline = FigurePipeline::new(&gpu_ctx);

        let canvas = figure.canvas();
        let texture = Texture::from_rgba8(
            &gpu_ctx,
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            &settings.texture,
        )?;
        let texture_bind_group = pipeline.create_texture_bind_group(&gpu_ctx, &texture);

        Ok(Self {
            gpu_ctx,
            pipeline,
            _texture: texture,
            texture_bind_group,
            figure_size: (canvas.width(), canvas.height()),
        })
    }

    fn render(&mut self, view: ViewTransform) -> std::result::Result<(), wgpu::SurfaceError> {
        let output = self.gpu_ctx.surface.get_current_texture()?;
        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.pipeline.update_transform(
            &self.gpu_ctx,
            view.to_uniform(self.figure_size, self.gpu_ctx.size()),
        );

        let mut encoder =
            self.gpu_ctx
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Figure Encoder"),
                });

        self.pipeline.render(
            &mut encoder,
            &target,
            &self.texture_bind_group,
            self.gpu_ctx.config.clear_color.into(),
        );

        self.gpu_ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

struct FigureViewer<'a> {
    figure: &'a Figure,
    settings: &'a ViewerSettings,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    view: ViewTransform,
    input: InputState,
    error: Option<Error>,
}

impl<'a> FigureViewer<'a> {
    fn new(figure: &'a Figure, settings: &'a ViewerSettings) -> Self {
        Self {
            figure,
            settings,
            window: None,
            gpu: None,
            view: ViewTransform::new(),
            input: InputState::default(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: Error) {
        log::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Returns true when the event changed the view.
    fn handle_input(&mut self, event: &WindowEvent, surface_size: (u32, u32)) -> bool {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.input.dragging = *state == ElementState::Pressed;
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                let current = (position.x, position.y);
                let previous = self.input.cursor.replace(current);
                match previous {
                    Some(last) if self.input.dragging => {
                        let (x0, y0) = to_clip(last, surface_size);
                        let (x1, y1) = to_clip(current, surface_size);
                        self.view.pan(x1 - x0, y1 - y0);
                        true
                    }
                    _ => false,
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.input.cursor = None;
                self.input.dragging = false;
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                if scroll == 0.0 {
                    return false;
                }
                let (cx, cy) = self
                    .input
                    .cursor
                    .map_or((0.0, 0.0), |cursor| to_clip(cursor, surface_size));
                let factor = if scroll > 0.0 { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
                self.view.zoom_at_point(cx, cy, factor);
                true
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::KeyR),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.view.reset();
                true
            }
            _ => false,
        }
    }
}

impl ApplicationHandler for FigureViewer<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let size = self
            .settings
            .window_size((self.figure.width(), self.figure.height()));
        let attributes = Window::default_attributes()
            .with_title(self.settings.window_title.clone())
            .with_inner_size(size);

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        match GpuState::new(window.clone(), self.figure, self.settings) {
            Ok(gpu) => {
                log::info!("Viewer ready: {}", self.settings.window_title);
                self.gpu = Some(gpu);
                self.window = Some(window);
                self.request_redraw();
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(surface_size) = self.gpu.as_ref().map(|gpu| gpu.gpu_ctx.size()) else {
            return;
        };

        if self.handle_input(&event, surface_size) {
            self.request_redraw();
            return;
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                log::debug!("Viewer closed");
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.gpu_ctx.resize(physical_size.width, physical_size.height);
                }
                self.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                let view = self.view;
                let Some(gpu) = &mut self.gpu else {
                    return;
                };
                match gpu.render(view) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let (w, h) = gpu.gpu_ctx.size();
                        gpu.gpu_ctx.resize(w, h);
                        self.request_redraw();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        self.fail(event_loop, Error::Viewer("GPU out of memory".to_string()));
                    }
                    Err(e) => log::warn!("Render error: {e:?}"),
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_keeps_cursor_fixed() {
        let mut view = ViewTransform::new();
        let cursor = (0.5, -0.25);
        // A point under the cursor maps to itself before and after zooming.
        let before = (
            (cursor.0 - view.offset_x) / view.zoom,
            (cursor.1 - view.offset_y) / view.zoom,
        );
        view.zoom_at_point(cursor.0, cursor.1, ZOOM_STEP);
        let after = (
            before.0 * view.zoom + view.offset_x,
            before.1 * view.zoom + view.offset_y,
        );

        assert!((after.0 - cursor.0).abs() < 1e-6);
        assert!((after.1 - cursor.1).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut view = ViewTransform::new();
        for _ in 0..100 {
            view.zoom_at_point(0.0, 0.0, ZOOM_STEP);
        }
        assert_eq!(view.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_reset() {
        let mut view = ViewTransform::new();
        view.pan(0.3, 0.1);
        view.zoom_at_point(0.2, 0.2, 2.0);
        view.reset();
        assert_eq!(view, ViewTransform::new());
    }

    #[test]
    fn test_to_clip_corners() {
        assert_eq!(to_clip((0.0, 0.0), (100, 50)), (-1.0, 1.0));
        assert_eq!(to_clip((100.0, 50.0), (100, 50)), (1.0, -1.0));
        assert_eq!(to_clip((50.0, 25.0), (100, 50)), (0.0, 0.0));
    }

    #[test]
    fn test_window_size_follows_figure() {
        let settings = ViewerSettings::default();
        let size = settings.window_size((1000, 1200));
        assert_eq!(size, LogicalSize::new(750.0, 900.0));
    }
}
