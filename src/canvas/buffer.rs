//! The in-memory raster the user draws into.

use anyhow::{Context as _, Result, ensure};
use cairo::{Context, Format, ImageSurface};

use crate::draw::Color;

/// Fixed-size ARGB raster backing the drawing surface.
///
/// Created once at mount with a logical resolution independent of how the
/// canvas is displayed, and mutated in place by the renderer. Cairo contexts
/// are created per draw call and dropped immediately so the surface stays
/// exclusively borrowable for snapshot and restore.
pub struct PixelBuffer {
    surface: ImageSurface,
    width: u32,
    height: u32,
}

/// An immutable full copy of the pixel buffer at one instant.
///
/// Used both as the pre-gesture baseline for shape preview and as history
/// entries. Snapshots are plain byte copies of the surface, so restoring one
/// is exact.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    bytes: Vec<u8>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Snapshot({} bytes)", self.bytes.len())
    }
}

impl PixelBuffer {
    /// Creates a buffer of the given logical resolution, filled with the
    /// background color.
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self> {
        let surface = ImageSurface::create(Format::ARgb32, width as i32, height as i32)
            .context("failed to create canvas surface")?;
        let mut buffer = Self {
            surface,
            width,
            height,
        };
        buffer.fill(background)?;
        Ok(buffer)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Runs a drawing closure against a transient Cairo context.
    ///
    /// The context must not outlive the call: while one exists the surface
    /// cannot be snapshotted or restored.
    pub(crate) fn with_ctx<F>(&mut self, draw: F) -> Result<()>
    where
        F: FnOnce(&Context),
    {
        let ctx = Context::new(&self.surface).context("failed to create cairo context")?;
        draw(&ctx);
        Ok(())
    }

    /// Floods the whole buffer with a single color.
    pub fn fill(&mut self, color: Color) -> Result<()> {
        self.with_ctx(|ctx| {
            ctx.set_source_rgba(color.r, color.g, color.b, color.a);
            ctx.set_operator(cairo::Operator::Source);
            let _ = ctx.paint();
        })
    }

    /// Captures the current pixel contents.
    pub fn snapshot(&mut self) -> Result<Snapshot> {
        self.surface.flush();
        let data = self
            .surface
            .data()
            .context("canvas surface is externally borrowed")?;
        Ok(Snapshot {
            bytes: data.to_vec(),
        })
    }

    /// Overwrites the pixel contents from a snapshot of this buffer.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.surface.flush();
        {
            let mut data = self
                .surface
                .data()
                .context("canvas surface is externally borrowed")?;
            ensure!(
                snapshot.bytes.len() == data.len(),
                "snapshot of {} bytes does not match a {}x{} buffer",
                snapshot.bytes.len(),
                self.width,
                self.height
            );
            data.copy_from_slice(&snapshot.bytes);
        }
        self.surface.mark_dirty();
        Ok(())
    }

    /// Encodes the buffer as PNG, the format handed to the gallery on save.
    pub fn export_png(&mut self) -> Result<Vec<u8>> {
        self.surface.flush();
        let mut png = Vec::new();
        self.surface
            .write_to_png(&mut png)
            .context("failed to encode canvas as PNG")?;
        Ok(png)
    }

    /// Raw bytes of one pixel (premultiplied ARGB in platform byte order).
    ///
    /// Intended for probing in tests; grayscale colors read the same on any
    /// endianness.
    pub fn pixel(&mut self, x: u32, y: u32) -> Result<[u8; 4]> {
        ensure!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) is outside the {}x{} buffer",
            self.width,
            self.height
        );
        self.surface.flush();
        let stride = self.surface.stride() as usize;
        let data = self
            .surface
            .data()
            .context("canvas surface is externally borrowed")?;
        let offset = y as usize * stride + x as usize * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&data[offset..offset + 4]);
        Ok(px)
    }
}
