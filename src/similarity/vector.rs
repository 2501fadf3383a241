use crate::hashing::hash_text;

/// Embedding values tagged with the BLAKE3 hash of the text they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityVector {
    pub values: Vec<f32>,
    pub text_hash: [u8; 32],
}

impl SimilarityVector {
    pub fn new(text: &str, values: Vec<f32>) -> Self {
        Self {
            values,
            text_hash: hash_text(text),
        }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.values.len()
    }

    pub fn is_from(&self, text: &str) -> bool {
        self.text_hash == hash_text(text)
    }
}

/// Cosine similarity. Mismatched or empty inputs, and zero vectors, score 0.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) = a
        .iter()
        .zip(b.iter())
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
            (dot + av * bv, na + av * av, nb + bv * bv)
        });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Best match over the ideal set, clamped to `[0, 1]`. Not rounded; routing
/// compares this raw value. An empty ideal set scores 0.
pub fn best_similarity(candidate: &[f32], ideals: &[SimilarityVector]) -> f32 {
    let best = ideals
        .iter()
        .map(|ideal| cosine_similarity(candidate, &ideal.values))
        .filter(|s| s.is_finite())
        .fold(0.0f32, f32::max);

    best.clamp(0.0, 1.0)
}
