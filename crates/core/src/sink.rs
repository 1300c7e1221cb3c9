use marker_chart_protocol::RenderCommand;

use crate::error::{ChartError, ChartResult};
use crate::text::{MonospaceMeasure, TextMeasure};

/// A pixel surface that accepts render commands.
///
/// Commands must be honored in device-independent pixels. A sink whose
/// upstream transform is not the identity reports it through
/// [`RenderSink::transform_scale`] and painting refuses to run against it.
pub trait RenderSink {
    fn submit(&mut self, command: RenderCommand);

    /// Scale of the transform already applied to this surface.
    fn transform_scale(&self) -> f64 {
        1.0
    }

    /// Create text metrics matching how this surface draws text.
    fn text_measurement(&self) -> Box<dyn TextMeasure>;
}

pub fn ensure_identity_scale(sink: &dyn RenderSink) -> ChartResult<()> {
    let scale = sink.transform_scale();
    if (scale - 1.0).abs() > f64::EPSILON {
        return Err(ChartError::ScaleAssumptionViolated { scale });
    }
    Ok(())
}

/// In-memory sink that records commands in submission order.
#[derive(Debug, Clone)]
pub struct CommandBuffer {
    commands: Vec<RenderCommand>,
    font_size: f64,
    scale: f64,
}

impl CommandBuffer {
    pub fn new(font_size: f64) -> Self {
        Self {
            commands: Vec::new(),
            font_size,
            scale: 1.0,
        }
    }

    /// Pretend an upstream transform of `scale` is active.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl RenderSink for CommandBuffer {
    fn submit(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    fn transform_scale(&self) -> f64 {
        self.scale
    }

    fn text_measurement(&self) -> Box<dyn TextMeasure> {
        Box::new(MonospaceMeasure::for_font_size(self.font_size))
    }
}
