/// Construction options for a [`GeometryBuffer`](crate::GeometryBuffer).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferOptions {
    /// Debug label, attached to log output.
    pub label: Option<String>,
    /// Vertices to reserve up front.
    pub vertex_capacity: usize,
    /// Indices to reserve up front.
    pub index_capacity: usize,
}

impl BufferOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_vertex_capacity(mut self, capacity: usize) -> Self {
        self.vertex_capacity = capacity;
        self
    }

    pub fn with_index_capacity(mut self, capacity: usize) -> Self {
        self.index_capacity = capacity;
        self
    }
}
