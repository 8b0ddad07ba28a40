use crate::{
    foundation::{
        core::Mat4,
        error::{MdlError, MdlResult},
    },
    transform::affine,
};

/// Stack of composed transforms; the top is the active coordinate system.
///
/// Never empty. [`Mat4`] is `Copy`, so every slot owns its own matrix and mutating one can never
/// leak into another.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformStack {
    mats: Vec<Mat4>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    /// A stack holding only the identity.
    pub fn new() -> Self {
        Self {
            mats: vec![affine::identity()],
        }
    }

    pub fn depth(&self) -> usize {
        self.mats.len()
    }

    pub fn top(&self) -> &Mat4 {
        self.mats.last().expect("transform stack is never empty")
    }

    pub fn top_mut(&mut self) -> &mut Mat4 {
        self.mats.last_mut().expect("transform stack is never empty")
    }

    /// Duplicate the top and make the copy the new top.
    pub fn push_copy(&mut self) {
        let top = *self.top();
        self.mats.push(top);
    }

    /// Remove and return the top. The bottom matrix can never be popped.
    pub fn pop(&mut self) -> MdlResult<Mat4> {
        if self.mats.len() <= 1 {
            return Err(MdlError::stack_underflow(
                "pop would leave the transform stack empty",
            ));
        }
        Ok(self.mats.pop().expect("len checked above"))
    }

    pub fn replace_top(&mut self, m: Mat4) {
        *self.top_mut() = m;
    }

    /// Compose `local` onto the top and replace it; does not add a level.
    pub fn apply(&mut self, local: Mat4) {
        let composed = affine::compose(*self.top(), local);
        self.replace_top(composed);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/stack.rs"]
mod tests;
