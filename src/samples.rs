use serde_json::Value;

use crate::diagnostic::Diagnostic;
use crate::model::{parse_object, KeyConvention};
use crate::span::Span;

/// One recorded forward pass: a literal input vector and the class index
/// (or vector) the network is expected to produce.
#[derive(Clone, Debug)]
pub struct Sample {
    pub input: Value,
    pub expected: Value,
}

/// A validated test-samples file.
///
/// The sample count is half the key count; every index from 1 up to that
/// count must have both an input and an output entry.
#[derive(Clone, Debug)]
pub struct TestSamples {
    pub samples: Vec<Sample>,
    pub convention: KeyConvention,
}

impl TestSamples {
    pub fn parse(source: &str, convention: KeyConvention) -> Result<TestSamples, Diagnostic> {
        let map = parse_object(source, "test samples")?;
        let count = map.len() / 2;

        let mut samples = Vec::with_capacity(count);
        for i in 1..=count {
            let input_key = convention.input_key(i);
            let output_key = convention.output_key(i);
            let input = map
                .get(&input_key)
                .cloned()
                .ok_or_else(|| missing_sample_key(&input_key, count))?;
            let expected = map
                .get(&output_key)
                .cloned()
                .ok_or_else(|| missing_sample_key(&output_key, count))?;
            samples.push(Sample { input, expected });
        }

        Ok(TestSamples {
            samples,
            convention,
        })
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

fn missing_sample_key(key: &str, count: usize) -> Diagnostic {
    Diagnostic::error(format!("test samples missing key '{}'", key), Span::dummy())
        .with_note(format!("{} samples implied by the number of keys", count))
        .with_help(
            "every index up to the sample count needs both an input and an output entry"
                .to_string(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_sample() {
        let samples =
            TestSamples::parse(r#"{"in1": [1, 1], "out1": 0}"#, KeyConvention::Short).unwrap();
        assert_eq!(samples.sample_count(), 1);
        assert_eq!(samples.samples[0].expected, serde_json::json!(0));
    }

    #[test]
    fn test_parse_multiple_samples_in_index_order() {
        let samples = TestSamples::parse(
            r#"{"out2": 1, "in1": [1], "out1": 0, "in2": [2]}"#,
            KeyConvention::Short,
        )
        .unwrap();
        assert_eq!(samples.sample_count(), 2);
        assert_eq!(samples.samples[0].input, serde_json::json!([1]));
        assert_eq!(samples.samples[1].input, serde_json::json!([2]));
    }

    #[test]
    fn test_parse_long_convention_keys() {
        let samples = TestSamples::parse(
            r#"{"input1": [3, 4], "output1": 2}"#,
            KeyConvention::Long,
        )
        .unwrap();
        assert_eq!(samples.sample_count(), 1);
    }

    #[test]
    fn test_missing_pair_is_error() {
        // Four keys imply two samples, but sample 2 has no output.
        let err = TestSamples::parse(
            r#"{"in1": [1], "out1": 0, "in2": [2], "in3": [3]}"#,
            KeyConvention::Short,
        )
        .unwrap_err();
        assert!(err.message.contains("'out2'"));
    }

    #[test]
    fn test_odd_key_count_rounds_down() {
        // Three keys imply one sample; the stray key is ignored.
        let samples = TestSamples::parse(
            r#"{"in1": [1], "out1": 0, "in2": [2]}"#,
            KeyConvention::Short,
        )
        .unwrap();
        assert_eq!(samples.sample_count(), 1);
    }

    #[test]
    fn test_empty_object_yields_no_samples() {
        let samples = TestSamples::parse("{}", KeyConvention::Short).unwrap();
        assert_eq!(samples.sample_count(), 0);
    }

    #[test]
    fn test_wrong_convention_is_error() {
        let err = TestSamples::parse(
            r#"{"input1": [1], "output1": 0}"#,
            KeyConvention::Short,
        )
        .unwrap_err();
        assert!(err.message.contains("'in1'"));
    }
}
