//! Adapter, surface and sampler settings.

/// How the viewer's GPU context is set up.
#[derive(Debug, Clone)]
pub struct GpuConfig {
    /// A static figure never needs the discrete GPU.
    pub power_preference: wgpu::PowerPreference,
    /// Preferred mode; falls back to `Fifo` when the surface lacks it.
    pub present_mode: wgpu::PresentMode,
    pub max_frame_latency: u32,
    /// Background around the letterboxed figure.
    pub clear_color: ClearColor,
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::LowPower,
            present_mode: wgpu::PresentMode::Fifo,
            max_frame_latency: 2,
            clear_color: ClearColor::LIGHT_GRAY,
        }
    }
}

/// Sampler filters for the figure texture.
#[derive(Debug, Clone)]
pub struct TextureConfig {
    /// Used when zoomed in. `Nearest` keeps array cells hard-edged.
    pub mag_filter: wgpu::FilterMode,
    /// Used when the window is smaller than the figure.
    pub min_filter: wgpu::FilterMode,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Linear,
        }
    }
}

/// RGBA clear color in linear `[0, 1]` components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl ClearColor {
    pub const LIGHT_GRAY: ClearColor = ClearColor {
        r: 0.85,
        g: 0.85,
        b: 0.85,
        a: 1.0,
    };
}

impl From<ClearColor> for wgpu::Color {
    fn from(c: ClearColor) -> Self {
        wgpu::Color {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_color_converts() {
        let color: wgpu::Color = ClearColor::LIGHT_GRAY.into();
        assert_eq!(color.r, 0.85);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn test_zoom_keeps_cells_sharp() {
        assert_eq!(TextureConfig::default().mag_filter, wgpu::FilterMode::Nearest);
    }
}
