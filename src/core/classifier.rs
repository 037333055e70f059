// src/core/classifier.rs
//
// Boundary to the diagnostic classifier. The pipeline only depends on the
// output contract: five non-negative probabilities in class order.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use super::signal::Signal;
use crate::error::{EcgError, Result};

/// Diagnostic classes, in the order the classifier emits them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticClass {
    Normal,
    #[serde(rename = "ST Depression")]
    StDepression,
    #[serde(rename = "Myocardial Infarction")]
    MyocardialInfarction,
    #[serde(rename = "ST Elevation")]
    StElevation,
    #[serde(rename = "Other Abnormalities")]
    OtherAbnormalities,
}

impl DiagnosticClass {
    pub const COUNT: usize = 5;

    pub fn all() -> [Self; Self::COUNT] {
        [
            Self::Normal,
            Self::StDepression,
            Self::MyocardialInfarction,
            Self::StElevation,
            Self::OtherAbnormalities,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Normal => 0,
            Self::StDepression => 1,
            Self::MyocardialInfarction => 2,
            Self::StElevation => 3,
            Self::OtherAbnormalities => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::StDepression => "ST Depression",
            Self::MyocardialInfarction => "Myocardial Infarction",
            Self::StElevation => "ST Elevation",
            Self::OtherAbnormalities => "Other Abnormalities",
        }
    }
}

impl fmt::Display for DiagnosticClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Class probability vector, validated on construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassProbabilities([f32; DiagnosticClass::COUNT]);

impl ClassProbabilities {
    /// Validate raw classifier output: exactly five finite, non-negative values
    pub fn from_raw(raw: &[f32]) -> Result<Self> {
        if raw.len() != DiagnosticClass::COUNT {
            return Err(EcgError::Classifier(format!(
                "expected {} class probabilities, got {}",
                DiagnosticClass::COUNT,
                raw.len()
            )));
        }
        if let Some(bad) = raw.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(EcgError::Classifier(format!("invalid probability {}", bad)));
        }
        let mut values = [0.0f32; DiagnosticClass::COUNT];
        values.copy_from_slice(raw);
        Ok(Self(values))
    }

    pub fn get(&self, class: DiagnosticClass) -> f32 {
        self.0[class.index()]
    }

    /// Predicted class; the first index wins on ties
    pub fn argmax(&self) -> DiagnosticClass {
        let mut best = DiagnosticClass::Normal;
        for class in DiagnosticClass::all() {
            if self.get(class) > self.get(best) {
                best = class;
            }
        }
        best
    }

    pub fn top(&self) -> (DiagnosticClass, f32) {
        let class = self.argmax();
        (class, self.get(class))
    }

    pub fn iter(&self) -> impl Iterator<Item = (DiagnosticClass, f32)> + '_ {
        DiagnosticClass::all().into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Anything that can score a signal against the diagnostic classes.
///
/// A failure is fatal to the pipeline run; implementations must not
/// substitute a default diagnosis.
pub trait Classifier {
    fn classify(&self, signal: &Signal) -> Result<ClassProbabilities>;
}

impl<F> Classifier for F
where
    F: Fn(&Signal) -> Result<ClassProbabilities>,
{
    fn classify(&self, signal: &Signal) -> Result<ClassProbabilities> {
        self(signal)
    }
}

/// Softmax over a dense linear layer, loaded from exported JSON weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifier {
    /// One weight row per class, each the length of the input signal
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
}

impl LinearClassifier {
    pub fn new(weights: Vec<Vec<f32>>, bias: Vec<f32>) -> Result<Self> {
        let model = Self { weights, bias };
        model.check_shape()?;
        Ok(model)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| EcgError::io(path, e))?;
        let model: Self = serde_json::from_str(&text)
            .map_err(|e| EcgError::Classifier(format!("{}: {}", path.display(), e)))?;
        model.check_shape()?;
        Ok(model)
    }

    /// Signal length this model was trained for
    pub fn input_len(&self) -> usize {
        self.weights.first().map(Vec::len).unwrap_or(0)
    }

    fn check_shape(&self) -> Result<()> {
        if self.weights.len() != DiagnosticClass::COUNT || self.bias.len() != DiagnosticClass::COUNT
        {
            return Err(EcgError::Classifier(format!(
                "model has {} weight rows and {} biases, expected {}",
                self.weights.len(),
                self.bias.len(),
                DiagnosticClass::COUNT
            )));
        }
        let width = self.input_len();
        if width == 0 || self.weights.iter().any(|row| row.len() != width) {
            return Err(EcgError::Classifier("ragged or empty weight matrix".into()));
        }
        Ok(())
    }
}

impl Classifier for LinearClassifier {
    fn classify(&self, signal: &Signal) -> Result<ClassProbabilities> {
        if signal.len() != self.input_len() {
            return Err(EcgError::Classifier(format!(
                "model expects {} samples, signal has {}",
                self.input_len(),
                signal.len()
            )));
        }

        let logits: Vec<f32> = self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| row.iter().zip(signal.samples()).map(|(w, x)| w * x).sum::<f32>() + b)
            .collect();

        let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let exp: Vec<f32> = logits.iter().map(|l| (l - max).exp()).collect();
        let total: f32 = exp.iter().sum();
        let probs: Vec<f32> = exp.iter().map(|e| e / total).collect();
        debug!("linear classifier probabilities: {:?}", probs);

        ClassProbabilities::from_raw(&probs)
    }
}
