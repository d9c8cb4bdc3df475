//! Curated metric-name vocabularies.
//!
//! Terms are matched as case-insensitive substrings of the column name. Keep
//! them lowercase.

/// Metric names where a larger value is better.
pub const ASCENDING_TERMS: &[&str] = &[
    "accuracy",
    "acc",
    "precision",
    "prec",
    "recall",
    "f1",
    "fscore",
    "auc",
    "roc",
    "score",
    "quality",
    "iou",
    "map",
    "dice",
    "jaccard",
    "lrap",
    "r2",
    "psnr",
    "ssim",
    "bleu",
    "rouge",
    "meteor",
    "ndcg",
    "mrr",
    "reward",
    "return",
    "top1",
    "top5",
    "throughput",
    "samples_per_sec",
    "tokens_per_sec",
];

/// Metric names where a smaller value is better.
pub const DESCENDING_TERMS: &[&str] = &[
    "loss",
    "logloss",
    "entropy",
    "crossentropy",
    "cross_entropy",
    "cross-entropy",
    "divergence",
    "kld",
    "error",
    "err",
    "time",
    "bpc",
    "bpd",
    "bits_per",
    "bits-per",
    "perplexity",
    "ppl",
    "chi",
    "mape",
    "mse",
    "mae",
    "rmse",
    "rmsle",
    "wer",
    "cer",
    "fid",
    "latency",
    "duration",
    "regret",
];

/// Identifiers that never carry a trend, regardless of other matches.
pub const NEUTRAL_TERMS: &[&str] = &["date", "datetime", "timestamp", "clock"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terms_are_lowercase() {
        for term in ASCENDING_TERMS
            .iter()
            .chain(DESCENDING_TERMS)
            .chain(NEUTRAL_TERMS)
        {
            assert_eq!(term.to_lowercase(), *term);
            assert!(!term.is_empty());
        }
    }
}
