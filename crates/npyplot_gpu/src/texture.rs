use crate::config::TextureConfig;
use crate::context::GpuContext;
use crate::error::{GpuError, Result};

/// GPU copy of the composed figure.
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Upload tightly packed sRGB RGBA8 pixels.
    pub fn from_rgba8(
        ctx: &GpuContext,
        data: &[u8],
        width: u32,
        height: u32,
        config: &TextureConfig,
    ) -> Result<Self> {
        validate_rgba8(data.len(), width, height, ctx.max_texture_dimension())?;

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Figure Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            texture.as_image_copy(),
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Figure Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: config.mag_filter,
            min_filter: config.min_filter,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Ok(Self {
            texture,
            view,
            sampler,
            width,
            height,
        })
    }
}

fn validate_rgba8(len: usize, width: u32, height: u32, max_dimension: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(GpuError::Texture(format!("Empty texture: {width}x{height}")));
    }
    if width > max_dimension || height > max_dimension {
        return Err(GpuError::Texture(format!(
            "Texture {width}x{height} exceeds device limit of {max_dimension}"
        )));
    }
    let expected_size = width as usize * height as usize * 4;
    if len != expected_size {
        return Err(GpuError::Texture(format!(
            "Invalid data size: expected {expected_size} bytes for {width}x{height} RGBA8, got {len}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_exact_size() {
        assert!(validate_rgba8(4 * 10 * 20, 10, 20, 2048).is_ok());
    }

    #[test]
    fn test_validate_rejects_wrong_size() {
        let err = validate_rgba8(10, 10, 20, 2048).unwrap_err();
        assert!(err.to_string().contains("expected 800 bytes"));
    }

    #[test]
    fn test_validate_rejects_oversized() {
        assert!(validate_rgba8(4 * 4096, 4096, 1, 2048).is_err());
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(validate_rgba8(0, 0, 0, 2048).is_err());
    }
}
