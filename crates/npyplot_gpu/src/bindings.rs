//! Shader binding constants.
//!
//! These numbers must match the `@group`/`@binding` attributes in
//! `shaders/figure.wgsl`.

/// Group 0: Uniforms
pub const UNIFORM_GROUP: u32 = 0;
/// Binding 0 in group 0: Transform matrix uniform
pub const UNIFORM_TRANSFORM_BINDING: u32 = 0;

/// Group 1: Figure texture resources
pub const TEXTURE_GROUP: u32 = 1;
/// Binding 0 in group 1: Texture 2D
pub const TEXTURE_BINDING: u32 = 0;
/// Binding 1 in group 1: Sampler
pub const SAMPLER_BINDING: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    const SHADER: &str = include_str!("shaders/figure.wgsl");

    #[test]
    fn test_shader_uses_declared_bindings() {
        let transform = format!("@group({UNIFORM_GROUP}) @binding({UNIFORM_TRANSFORM_BINDING})");
        let texture = format!("@group({TEXTURE_GROUP}) @binding({TEXTURE_BINDING})");
        let sampler = format!("@group({TEXTURE_GROUP}) @binding({SAMPLER_BINDING})");

        assert!(SHADER.contains(&transform));
        assert!(SHADER.contains(&texture));
        assert!(SHADER.contains(&sampler));
    }
}
