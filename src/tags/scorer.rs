// Derived from https://github.com/MaartenGr/KeyBERT, shared under MIT License
//
// Copyright (c) 2020, Maarten P. Grootendorst
// Copyright (c) 2022, Guillaume Becquin
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Keyword scoring over embeddings
//!
//! Ranks candidate embeddings against a document embedding either by plain
//! cosine similarity or by maximal marginal relevance, which trades
//! relevance to the document against redundancy with already selected
//! keywords.

use super::embedder::cosine_similarity;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeywordScorerType {
    CosineSimilarity,
    MaximalMarginRelevance { diversity: f32 },
}

impl KeywordScorerType {
    /// Select up to `num_keywords` candidates.
    ///
    /// Returns `(candidate index, document similarity)` pairs sorted by
    /// similarity, highest first. Ties keep candidate order.
    pub fn score_keywords(
        &self,
        document_embedding: &[f32],
        word_embeddings: &[Vec<f32>],
        num_keywords: usize,
    ) -> Vec<(usize, f32)> {
        if num_keywords == 0 || word_embeddings.is_empty() {
            return Vec::new();
        }

        let word_document_similarities: Vec<f32> = word_embeddings
            .iter()
            .map(|w| cosine_similarity(document_embedding, w))
            .collect();

        let selected = match self {
            KeywordScorerType::CosineSimilarity => {
                (0..word_embeddings.len()).collect::<Vec<usize>>()
            }
            KeywordScorerType::MaximalMarginRelevance { diversity } => {
                maximal_margin_relevance(
                    &word_document_similarities,
                    word_embeddings,
                    num_keywords,
                    *diversity,
                )
            }
        };

        let mut scored: Vec<(usize, f32)> = selected
            .into_iter()
            .map(|index| (index, word_document_similarities[index]))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(num_keywords);
        scored
    }
}

/// Index of the largest value; first one wins on ties
fn argmax(values: impl Iterator<Item = f32>) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, v) in values.enumerate() {
        if best.map_or(true, |(_, b)| v > b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

fn maximal_margin_relevance(
    word_document_similarities: &[f32],
    word_embeddings: &[Vec<f32>],
    num_keywords: usize,
    diversity: f32,
) -> Vec<usize> {
    let Some(first) = argmax(word_document_similarities.iter().copied()) else {
        return Vec::new();
    };

    let mut keyword_indices = vec![first];
    let mut candidate_indices: Vec<usize> = (0..word_embeddings.len())
        .filter(|&i| i != first)
        .collect();

    while keyword_indices.len() < num_keywords && !candidate_indices.is_empty() {
        let mmr_scores = candidate_indices.iter().map(|&candidate| {
            let redundancy = keyword_indices
                .iter()
                .map(|&kw| cosine_similarity(&word_embeddings[candidate], &word_embeddings[kw]))
                .fold(f32::NEG_INFINITY, f32::max);
            (1.0 - diversity) * word_document_similarities[candidate] - diversity * redundancy
        });

        let Some(position) = argmax(mmr_scores) else {
            break;
        };
        keyword_indices.push(candidate_indices.remove(position));
    }

    keyword_indices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embeddings() -> (Vec<f32>, Vec<Vec<f32>>) {
        let document = vec![1.0, 1.0, 0.0];
        let words = vec![
            vec![1.0, 0.9, 0.0],  // 0: very relevant
            vec![1.0, 0.95, 0.0], // 1: near duplicate of 0, most relevant
            vec![0.0, 1.0, 0.2],  // 2: relevant, different direction
            vec![0.0, 0.0, 1.0],  // 3: irrelevant
        ];
        (document, words)
    }

    #[test]
    fn test_cosine_ranking() {
        let (doc, words) = embeddings();
        let scores = KeywordScorerType::CosineSimilarity.score_keywords(&doc, &words, 2);
        let indices: Vec<usize> = scores.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![1, 0]);
        assert!(scores[0].1 >= scores[1].1);
    }

    #[test]
    fn test_mmr_prefers_diverse_keywords() {
        let (doc, words) = embeddings();
        let scorer = KeywordScorerType::MaximalMarginRelevance { diversity: 0.7 };
        let indices: Vec<usize> = scorer
            .score_keywords(&doc, &words[..3], 2)
            .iter()
            .map(|(i, _)| *i)
            .collect();

        assert!(indices.contains(&1));
        assert!(indices.contains(&2));
        assert!(!indices.contains(&0));
    }

    #[test]
    fn test_mmr_caps_at_available_candidates() {
        let (doc, words) = embeddings();
        let scorer = KeywordScorerType::MaximalMarginRelevance { diversity: 0.5 };
        let scores = scorer.score_keywords(&doc, &words, 7);
        assert_eq!(scores.len(), words.len());
        for pair in scores.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn test_empty_inputs() {
        let scorer = KeywordScorerType::MaximalMarginRelevance { diversity: 0.5 };
        assert!(scorer.score_keywords(&[1.0], &[], 7).is_empty());
        assert!(scorer.score_keywords(&[1.0], &[vec![1.0]], 0).is_empty());
    }
}
