use std::collections::HashMap;
use std::fmt;

use candle_core::{DType, Device, IndexOp, Tensor, D};
use candle_nn::ops::softmax;
use candle_nn::{linear, Linear, Module, VarBuilder};
use candle_transformers::models::distilbert::{Config as DistilBertConfig, DistilBertModel};
use mood_core::{Error, Result, Sentiment};
use serde::Deserialize;
use tokenizers::Tokenizer;
use tracing::info;

use super::SentimentModel;
use crate::loader::{self, ModelSource};

/// Classification-head fields of the checkpoint config that the base
/// [`DistilBertConfig`] does not expose.
#[derive(Debug, Deserialize)]
struct HeadConfig {
    dim: usize,
    id2label: HashMap<String, String>,
}

pub struct DistilBertClassifier {
    model: DistilBertModel,
    pre_classifier: Linear,
    classifier: Linear,
    tokenizer: Tokenizer,
    labels: Vec<String>,
    device: Device,
}

impl fmt::Debug for DistilBertClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistilBertClassifier")
            .field("labels", &self.labels)
            .finish()
    }
}

impl DistilBertClassifier {
    pub async fn load(source: &ModelSource) -> Result<Self> {
        let files = loader::fetch(source).await?;
        let device = Device::Cpu;

        let raw_config = std::fs::read_to_string(&files.config)?;
        let config: DistilBertConfig = serde_json::from_str(&raw_config)?;
        let head: HeadConfig = serde_json::from_str(&raw_config)?;

        let mut labels: Vec<(usize, String)> = Vec::with_capacity(head.id2label.len());
        for (id, label) in head.id2label {
            let id = id
                .parse::<usize>()
                .map_err(|_| Error::Startup(format!("non-numeric label id {id}")))?;
            labels.push((id, label));
        }
        labels.sort_by_key(|(id, _)| *id);
        let labels: Vec<String> = labels.into_iter().map(|(_, label)| label).collect();
        if labels.is_empty() {
            return Err(Error::Startup("model config has no id2label map".to_string()));
        }

        let tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| Error::Startup(format!("loading tokenizer: {e}")))?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[files.weights.clone()], DType::F32, &device)?
        };
        let model = DistilBertModel::load(vb.pp("distilbert"), &config)?;
        let pre_classifier = linear(head.dim, head.dim, vb.pp("pre_classifier"))?;
        let classifier = linear(head.dim, labels.len(), vb.pp("classifier"))?;

        info!("🧠 Sentiment classifier ready ({} labels)", labels.len());

        Ok(Self {
            model,
            pre_classifier,
            classifier,
            tokenizer,
            labels,
            device,
        })
    }
}

#[async_trait::async_trait]
impl SentimentModel for DistilBertClassifier {
    fn name(&self) -> &str {
        "DistilBERT"
    }

    async fn classify(&self, text: &str) -> Result<Sentiment> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| Error::Inference(format!("tokenization: {e}")))?;

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        // candle's DistilBERT masks out positions where the mask is nonzero,
        // the inverse of the tokenizer's attention-mask convention.
        let mask: Vec<u8> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| u8::from(m == 0))
            .collect();
        let attention_mask = Tensor::from_slice(&mask, (1, mask.len()), &self.device)?;

        let hidden = self.model.forward(&input_ids, &attention_mask)?;
        let pooled = hidden.i((.., 0))?;
        let pooled = self.pre_classifier.forward(&pooled)?.relu()?;
        let logits = self.classifier.forward(&pooled)?;
        let probs = softmax(&logits, D::Minus1)?.squeeze(0)?.to_vec1::<f32>()?;

        let (best, score) = probs
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .ok_or_else(|| Error::Inference("classifier produced no logits".to_string()))?;

        Ok(Sentiment {
            label: self.labels[best].clone(),
            score: *score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::DEFAULT_MODEL_ID;

    #[tokio::test]
    #[ignore = "downloads model weights from the hub"]
    async fn test_classify_known_sentiments() {
        let source = ModelSource::Hub(DEFAULT_MODEL_ID.to_string());
        let model = DistilBertClassifier::load(&source).await.unwrap();

        let result = model
            .classify("I am really enjoying this experience!")
            .await
            .unwrap();
        assert_eq!(result.label, "POSITIVE");
        assert!(result.score >= 0.9 && result.score <= 1.0);

        let result = model
            .classify("This is making me very angry.")
            .await
            .unwrap();
        assert_eq!(result.label, "NEGATIVE");
        assert!(result.score >= 0.9 && result.score <= 1.0);
    }
}
