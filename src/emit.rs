use crate::literal;
use crate::model::ModelParameters;
use crate::samples::TestSamples;

/// Noir emitter. Assembles the generated program text section by section.
///
/// Sections appear in fixed order: the `noir_ml` import header, one pair
/// of `global` declarations per layer, the `main` forward pass, and the
/// test block when samples are present. The emitter never interprets the
/// parameter values; validation happened at parse time.
pub struct Emitter {
    output: String,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    pub fn emit_program(
        mut self,
        model: &ModelParameters,
        samples: Option<&TestSamples>,
    ) -> String {
        self.emit_header();
        self.emit_globals(model);
        self.emit_main(model);
        if let Some(samples) = samples {
            self.emit_tests(samples);
        }
        self.output
    }

    fn emit_header(&mut self) {
        self.output
            .push_str("use dep::noir_ml::{layers::fc, activations::relu, utils::arg_max};\n\n");
    }

    fn emit_globals(&mut self, model: &ModelParameters) {
        for layer in &model.layers {
            self.output.push_str(&format!(
                "global {}: [Field; {}] = {};\n",
                layer.weights_key,
                layer.weights.len(),
                literal::render_list(&layer.weights),
            ));
            self.output.push_str(&format!(
                "global {}: [Field; {}] = {};\n\n",
                layer.biases_key,
                layer.biases.len(),
                literal::render_list(&layer.biases),
            ));
        }
    }

    /// The forward pass: rectify after every layer except the last, then
    /// reduce the final layer's output to the index of its maximum.
    /// A single-layer network goes straight to arg_max.
    fn emit_main(&mut self, model: &ModelParameters) {
        self.output.push_str(&format!(
            "fn main(input: [Field; {}]) -> pub Field {{\n",
            model.input_dim,
        ));
        self.output.push_str("  let output = input;\n");

        let last = model.layers.len();
        for (i, layer) in model.layers.iter().enumerate() {
            if i + 1 != last {
                self.output.push_str(&format!(
                    "  let output = relu(fc(output, {}, {}));\n",
                    layer.weights_key, layer.biases_key,
                ));
            } else {
                self.output.push_str(&format!(
                    "  let output = arg_max(fc(output, {}, {}));\n",
                    layer.weights_key, layer.biases_key,
                ));
            }
        }

        self.output.push_str("  output\n}\n");
    }

    fn emit_tests(&mut self, samples: &TestSamples) {
        self.output
            .push_str("\n////////////////////\n//     TESTS      //\n////////////////////\n");
        for (i, sample) in samples.samples.iter().enumerate() {
            self.output.push_str(&format!(
                "#[test]\nfn test_main_{:03}() {{\n  let sample = {};\n  assert(main(sample) == {});\n}}\n\n",
                i + 1,
                literal::render(&sample.input),
                literal::render(&sample.expected),
            ));
        }
    }
}
