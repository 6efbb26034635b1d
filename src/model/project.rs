use crate::{
    foundation::error::{SpliceError, SpliceResult},
    model::layer::Layer,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const HD: Self = Self {
        width: 1920,
        height: 1080,
    };

    /// Falls back to [`Resolution::HD`] for each non-positive dimension.
    pub fn or_hd(width: Option<u32>, height: Option<u32>) -> Self {
        Self {
            width: width.filter(|w| *w > 0).unwrap_or(Self::HD.width),
            height: height.filter(|h| *h > 0).unwrap_or(Self::HD.height),
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::HD
    }
}

/// The canonical timeline every importer produces.
///
/// A project owns its layers exclusively. It is created by a converter (or
/// by the surrounding editor) and afterwards only changes through the
/// layer-level edit operations below; evaluation never mutates it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    /// Seconds; never shorter than the last layer end.
    pub duration: f64,
    pub resolution: Resolution,
    pub layers: Vec<Layer>,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>, resolution: Resolution) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration: 0.0,
            resolution,
            layers: Vec::new(),
        }
    }

    /// Latest `start_time + duration` over all layers (0 when empty).
    pub fn content_end(&self) -> f64 {
        self.layers
            .iter()
            .map(Layer::end_time)
            .fold(0.0, f64::max)
    }

    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn add_layer(&mut self, mut layer: Layer) -> SpliceResult<()> {
        validate_layer(&layer)?;
        if self.layer(&layer.id).is_some() {
            return Err(SpliceError::validation(format!(
                "layer id '{}' already exists",
                layer.id
            )));
        }
        layer.sort_keyframes();
        self.layers.push(layer);
        self.grow_to_content();
        Ok(())
    }

    /// Apply `edit` to the layer with `id`. The edited layer must stay valid
    /// and keep a unique id; on failure the project is left unchanged.
    pub fn update_layer(&mut self, id: &str, edit: impl FnOnce(&mut Layer)) -> SpliceResult<()> {
        let idx = self
            .layers
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| SpliceError::validation(format!("no layer with id '{id}'")))?;

        let mut edited = self.layers[idx].clone();
        edit(&mut edited);
        validate_layer(&edited)?;
        if edited.id != id && self.layer(&edited.id).is_some() {
            return Err(SpliceError::validation(format!(
                "layer id '{}' already exists",
                edited.id
            )));
        }

        edited.sort_keyframes();
        self.layers[idx] = edited;
        self.grow_to_content();
        Ok(())
    }

    pub fn remove_layer(&mut self, id: &str) -> Option<Layer> {
        let idx = self.layers.iter().position(|l| l.id == id)?;
        Some(self.layers.remove(idx))
    }

    pub fn validate(&self) -> SpliceResult<()> {
        if self.resolution.width == 0 || self.resolution.height == 0 {
            return Err(SpliceError::validation(
                "resolution width/height must be > 0",
            ));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(SpliceError::validation("duration must be finite and >= 0"));
        }

        let mut seen = std::collections::HashSet::new();
        for layer in &self.layers {
            validate_layer(layer)?;
            if !seen.insert(layer.id.as_str()) {
                return Err(SpliceError::validation(format!(
                    "duplicate layer id '{}'",
                    layer.id
                )));
            }
        }

        let end = self.content_end();
        if self.duration < end {
            return Err(SpliceError::validation(format!(
                "duration {} is shorter than content end {end}",
                self.duration
            )));
        }
        Ok(())
    }

    fn grow_to_content(&mut self) {
        self.duration = self.duration.max(self.content_end());
    }
}

fn validate_layer(layer: &Layer) -> SpliceResult<()> {
    if layer.id.trim().is_empty() {
        return Err(SpliceError::validation("layer id must be non-empty"));
    }
    if !layer.start_time.is_finite() || layer.start_time < 0.0 {
        return Err(SpliceError::validation(format!(
            "layer '{}' has invalid start time",
            layer.id
        )));
    }
    if !layer.duration.is_finite() || layer.duration <= 0.0 {
        return Err(SpliceError::validation(format!(
            "layer '{}' duration must be > 0",
            layer.id
        )));
    }
    for tr in [&layer.transition_in, &layer.transition_out]
        .into_iter()
        .flatten()
    {
        if !tr.duration.is_finite() || tr.duration <= 0.0 {
            return Err(SpliceError::validation(format!(
                "layer '{}' transition duration must be > 0",
                layer.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/model/project.rs"]
mod tests;
