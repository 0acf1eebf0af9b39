/// The slice of a compiled shader program this crate relies on.
///
/// Compilation, linking and uniform reflection live with the implementor.
pub trait ShaderProgram {
    /// Makes this program current. Stays current until another bind.
    fn bind(&self);

    /// Sets a scalar uniform on this program, which must be bound.
    ///
    /// Unknown names are ignored.
    fn set_uniform_f32(&self, name: &str, value: f32);
}
