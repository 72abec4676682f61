//! Render target contract: the single image slot a player writes to.

/// Mutable image slot owned by the rendering side.
pub trait RenderTarget {
    type Image: Clone;

    /// Image currently shown, if any.
    fn image(&self) -> Option<&Self::Image>;

    /// Replace the shown image. `None` clears the slot.
    fn set_image(&mut self, image: Option<Self::Image>);
}

/// Stock render target: stores the image and counts writes.
///
/// Adapters compare [`ImageSlot::revision`] between frames and only copy the
/// image out when it moved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageSlot<I> {
    image: Option<I>,
    revision: u64,
}

impl<I> ImageSlot<I> {
    pub fn new(image: Option<I>) -> Self {
        Self { image, revision: 0 }
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl<I: Clone> RenderTarget for ImageSlot<I> {
    type Image = I;

    fn image(&self) -> Option<&I> {
        self.image.as_ref()
    }

    fn set_image(&mut self, image: Option<I>) {
        self.image = image;
        self.revision = self.revision.wrapping_add(1);
    }
}
