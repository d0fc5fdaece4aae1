//! Vertex layout description.
//!
//! A [`VertexLayout`] says which optional attributes a buffer carries and how
//! many texture-coordinate channels it has. It is fixed when the buffer is
//! created.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Optional vertex components. Position is always present.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ComponentFlags: u8 {
        /// Per-vertex normal (3 floats).
        const NORMAL = 1 << 0;
        /// One or more texture-coordinate channels (2 floats each).
        const TEXCOORD = 1 << 1;
    }
}

/// Floats per vertex in the position segment.
pub const POSITION_WIDTH: usize = 3;
/// Floats per vertex in the normal segment.
pub const NORMAL_WIDTH: usize = 3;
/// Floats per vertex in each texture-coordinate segment.
pub const TEXCOORD_WIDTH: usize = 2;

/// A single vertex attribute stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Position,
    Normal,
    /// Texture-coordinate channel, 0-based.
    TexCoord(u32),
}

impl Attribute {
    /// Number of floats this attribute stores per vertex.
    pub const fn width(&self) -> usize {
        match self {
            Attribute::Position => POSITION_WIDTH,
            Attribute::Normal => NORMAL_WIDTH,
            Attribute::TexCoord(_) => TEXCOORD_WIDTH,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Position => write!(f, "position"),
            Attribute::Normal => write!(f, "normal"),
            Attribute::TexCoord(channel) => write!(f, "texcoord[{}]", channel),
        }
    }
}

/// Which attributes a geometry buffer stores.
///
/// # Example
///
/// ```
/// use strata_geometry::{ComponentFlags, VertexLayout};
///
/// let layout = VertexLayout::new(ComponentFlags::NORMAL | ComponentFlags::TEXCOORD, 2);
/// assert!(layout.has_normals());
/// assert_eq!(layout.tex_channel_count(), 2);
/// assert_eq!(layout.floats_per_vertex(), 3 + 3 + 2 * 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexLayout {
    components: ComponentFlags,
    tex_channel_count: u32,
}

impl VertexLayout {
    /// Create a layout.
    ///
    /// Without [`ComponentFlags::TEXCOORD`] the channel count is forced to 0.
    pub fn new(components: ComponentFlags, tex_channel_count: u32) -> Self {
        let tex_channel_count = if components.contains(ComponentFlags::TEXCOORD) {
            tex_channel_count
        } else {
            if tex_channel_count > 0 {
                tracing::debug!(
                    "Ignoring {} texture channels for a layout without TEXCOORD",
                    tex_channel_count
                );
            }
            0
        };

        Self {
            components,
            tex_channel_count,
        }
    }

    /// Positions only.
    pub fn position_only() -> Self {
        Self::new(ComponentFlags::empty(), 0)
    }

    /// Positions and normals.
    pub fn position_normal() -> Self {
        Self::new(ComponentFlags::NORMAL, 0)
    }

    /// Positions and `channels` texture-coordinate channels.
    pub fn textured(channels: u32) -> Self {
        Self::new(ComponentFlags::TEXCOORD, channels)
    }

    /// Positions, normals and `channels` texture-coordinate channels.
    pub fn lit_textured(channels: u32) -> Self {
        Self::new(ComponentFlags::NORMAL | ComponentFlags::TEXCOORD, channels)
    }

    pub fn components(&self) -> ComponentFlags {
        self.components
    }

    pub fn has_normals(&self) -> bool {
        self.components.contains(ComponentFlags::NORMAL)
    }

    pub fn has_tex_coords(&self) -> bool {
        self.components.contains(ComponentFlags::TEXCOORD)
    }

    /// Effective number of texture channels (0 without `TEXCOORD`).
    pub fn tex_channel_count(&self) -> u32 {
        self.tex_channel_count
    }

    /// Total floats stored per vertex across every enabled attribute.
    pub fn floats_per_vertex(&self) -> usize {
        self.attributes().map(|a| a.width()).sum()
    }

    /// Iterate the enabled attributes in storage order.
    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + '_ {
        let normal = self.has_normals().then_some(Attribute::Normal);
        std::iter::once(Attribute::Position)
            .chain(normal)
            .chain((0..self.tex_channel_count).map(Attribute::TexCoord))
    }

    /// Whether `attribute` is stored by buffers with this layout.
    pub fn contains(&self, attribute: Attribute) -> bool {
        match attribute {
            Attribute::Position => true,
            Attribute::Normal => self.has_normals(),
            Attribute::TexCoord(channel) => channel < self.tex_channel_count,
        }
    }
}

impl Default for VertexLayout {
    fn default() -> Self {
        Self::position_only()
    }
}
