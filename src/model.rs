use serde_json::{Map, Value};

use crate::diagnostic::Diagnostic;
use crate::span::Span;

/// Naming scheme tying JSON keys to layers and samples.
///
/// The exporters in the wild disagree: some write `w1`/`b1` with `in1`/
/// `out1` samples, others `l1_weights`/`l1_biases` with `input1`/
/// `output1`. Both are accepted; `detect` picks whichever layer 1
/// satisfies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyConvention {
    Short,
    Long,
}

impl KeyConvention {
    pub fn weights_key(self, layer: usize) -> String {
        match self {
            KeyConvention::Short => format!("w{}", layer),
            KeyConvention::Long => format!("l{}_weights", layer),
        }
    }

    pub fn biases_key(self, layer: usize) -> String {
        match self {
            KeyConvention::Short => format!("b{}", layer),
            KeyConvention::Long => format!("l{}_biases", layer),
        }
    }

    pub fn input_key(self, sample: usize) -> String {
        match self {
            KeyConvention::Short => format!("in{}", sample),
            KeyConvention::Long => format!("input{}", sample),
        }
    }

    pub fn output_key(self, sample: usize) -> String {
        match self {
            KeyConvention::Short => format!("out{}", sample),
            KeyConvention::Long => format!("output{}", sample),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            KeyConvention::Short => "short",
            KeyConvention::Long => "long",
        }
    }

    fn detect(map: &Map<String, Value>) -> Result<KeyConvention, Diagnostic> {
        if map.contains_key("w1") {
            return Ok(KeyConvention::Short);
        }
        if map.contains_key("l1_weights") {
            return Ok(KeyConvention::Long);
        }
        Err(
            Diagnostic::error("cannot find layer 1 in model parameters".to_string(), Span::dummy())
                .with_note("expected 'w1'/'b1' or 'l1_weights'/'l1_biases'".to_string())
                .with_help("layers must be keyed contiguously starting at 1".to_string()),
        )
    }
}

/// One layer's parameters, under the key names they were read from.
#[derive(Clone, Debug)]
pub struct LayerParams {
    pub weights_key: String,
    pub biases_key: String,
    pub weights: Vec<Value>,
    pub biases: Vec<Value>,
}

/// A validated model-parameters file: the discovered layers, the resolved
/// key convention, and the inferred input width.
#[derive(Clone, Debug)]
pub struct ModelParameters {
    pub layers: Vec<LayerParams>,
    pub convention: KeyConvention,
    pub input_dim: usize,
    /// Non-fatal findings (e.g. a layer-1 shape that does not divide evenly).
    pub warnings: Vec<Diagnostic>,
}

impl ModelParameters {
    /// Parse and validate a model-parameters JSON document.
    ///
    /// Layer discovery starts at index 1 and stops at the first index
    /// missing either key, so a gap truncates the network even if later
    /// indices exist. The input width is `len(weights_1) / len(biases_1)`
    /// by integer division.
    pub fn parse(
        source: &str,
        requested: Option<KeyConvention>,
    ) -> Result<ModelParameters, Diagnostic> {
        let map = parse_object(source, "model parameters")?;

        let convention = match requested {
            Some(c) => c,
            None => KeyConvention::detect(&map)?,
        };

        // Layer 1 must be complete under the chosen convention before any
        // discovery; a lone w1 is an error, not an empty network.
        for key in [convention.weights_key(1), convention.biases_key(1)] {
            if !map.contains_key(&key) {
                return Err(Diagnostic::error(
                    format!("model parameters missing key '{}'", key),
                    Span::dummy(),
                )
                .with_note(format!(
                    "the {} convention names layer 1 '{}' and '{}'",
                    convention.name(),
                    convention.weights_key(1),
                    convention.biases_key(1),
                )));
            }
        }

        let mut layers = Vec::new();
        let mut idx = 1;
        loop {
            let weights_key = convention.weights_key(idx);
            let biases_key = convention.biases_key(idx);
            if !map.contains_key(&weights_key) || !map.contains_key(&biases_key) {
                break;
            }
            let weights = array_values(&map, &weights_key, source)?;
            let biases = array_values(&map, &biases_key, source)?;
            layers.push(LayerParams {
                weights_key,
                biases_key,
                weights,
                biases,
            });
            idx += 1;
        }

        let first = &layers[0];
        if first.biases.is_empty() {
            return Err(Diagnostic::error(
                format!("bias array '{}' is empty", first.biases_key),
                Span::of_key(source, &first.biases_key),
            )
            .with_note(
                "the layer-1 bias length determines the network's input width".to_string(),
            ));
        }

        let input_dim = first.weights.len() / first.biases.len();

        let mut warnings = Vec::new();
        if first.weights.len() % first.biases.len() != 0 {
            warnings.push(
                Diagnostic::warning(
                    format!(
                        "'{}' has {} values, not a multiple of the {} in '{}'",
                        first.weights_key,
                        first.weights.len(),
                        first.biases.len(),
                        first.biases_key,
                    ),
                    Span::of_key(source, &first.weights_key),
                )
                .with_note(format!("input width rounds down to {}", input_dim)),
            );
        }

        Ok(ModelParameters {
            layers,
            convention,
            input_dim,
            warnings,
        })
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

/// Parse a JSON document that must be an object, mapping serde errors to a
/// diagnostic at the reported position.
pub(crate) fn parse_object(source: &str, what: &str) -> Result<Map<String, Value>, Diagnostic> {
    let value: Value = serde_json::from_str(source).map_err(|e| {
        Diagnostic::error(
            format!("invalid JSON: {}", e),
            Span::at_line_col(source, e.line(), e.column()),
        )
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(Diagnostic::error(
            format!("{} must be a JSON object", what),
            Span::dummy(),
        )),
    }
}

fn array_values(
    map: &Map<String, Value>,
    key: &str,
    source: &str,
) -> Result<Vec<Value>, Diagnostic> {
    match map.get(key) {
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(_) => Err(Diagnostic::error(
            format!("'{}' must be an array of numbers", key),
            Span::of_key(source, key),
        )),
        None => Err(Diagnostic::error(
            format!("missing key '{}'", key),
            Span::dummy(),
        )),
    }
}
