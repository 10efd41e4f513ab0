use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::graphics::PixelBuffer;

pub struct Canvas {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl Canvas {
    /// Finds the canvas element with the given id.
    pub fn find(document: &web_sys::Document, id: &str) -> Result<HtmlCanvasElement> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| GameError::MissingCanvas(id.to_owned()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| GameError::MissingCanvas(id.to_owned()))
    }

    /// Takes over the canvas, resizing it to the configured resolution. CSS takes care of
    /// scaling it up on screen.
    pub fn new(canvas: HtmlCanvasElement, config: &GameConfig) -> Result<Self> {
        canvas.set_width(config.width);
        canvas.set_height(config.height);
        let context = canvas
            .get_context("2d")?
            .ok_or(GameError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| GameError::ContextUnavailable)?;
        context.set_image_smoothing_enabled(false);
        Ok(Self { canvas, context })
    }

    pub fn pixel_buffer(&self) -> PixelBuffer {
        PixelBuffer::new(self.canvas.width(), self.canvas.height())
    }

    /// Copies a finished frame onto the canvas.
    pub fn present(&self, pixels: &PixelBuffer) -> Result<()> {
        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(pixels.as_bytes()),
            pixels.width(),
            pixels.height(),
        )?;
        self.context.put_image_data(&image, 0.0, 0.0)?;
        Ok(())
    }
}
