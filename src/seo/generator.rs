// Keyword-rich paragraph generation for guide pages.
//
// Paragraphs are assembled from fixed sentence templates, then the set is
// grown until it clears the word-count floor and the density target, and
// finally trimmed from the end while density overshoots the ceiling.

use serde::{Deserialize, Serialize};

use super::text::{count_words, normalize_whitespace, paragraph_stats, KeywordMatcher, KeywordStats};
use super::SeoError;

pub const MIN_PARAGRAPH_KEYWORD_OCCURRENCES: usize = 3;
pub const MIN_PAGE_WORDS: usize = 820;
pub const MIN_KEYWORD_RATIO: f64 = 0.03;
pub const MAX_KEYWORD_RATIO: f64 = 0.05;

const DEFAULT_TOPIC: &str = "event progression";
const DEFAULT_SUPPORTING_CONCEPT: &str = "steady weekly planning";

/// Label suffixes for paragraphs appended while the page is short on words.
const WORD_GROWTH_LABELS: (&str, &str) = ("reinforcement", "optimization");
/// Label suffixes for paragraphs appended while density is under target.
const DENSITY_GROWTH_LABELS: (&str, &str) = ("alignment", "cadence");

/// Most reinforcement sentences appended to one density-growth paragraph.
const MAX_DENSITY_REINFORCEMENTS: usize = 12;
/// Density growth adds at most this many multiples of the word floor.
const DENSITY_GROWTH_WORD_FACTOR: usize = 4;

/// Caller-supplied overrides. Every field is optional and clamped on resolve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorOptions {
    pub min_words: Option<usize>,
    pub target_density: Option<f64>,
    pub min_paragraph_keyword_occurrences: Option<usize>,
}

/// Thresholds actually used for one generation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorSettings {
    pub min_words: usize,
    pub target_density: f64,
    pub min_paragraph_keyword_occurrences: usize,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            min_words: MIN_PAGE_WORDS,
            target_density: MIN_KEYWORD_RATIO,
            min_paragraph_keyword_occurrences: MIN_PARAGRAPH_KEYWORD_OCCURRENCES,
        }
    }
}

impl GeneratorOptions {
    /// Apply defaults and clamps.
    ///
    /// - `target_density` is clamped into `[MIN_KEYWORD_RATIO, MAX_KEYWORD_RATIO]`;
    ///   NaN and infinities fall back to the default.
    /// - `min_paragraph_keyword_occurrences` never drops below
    ///   `MIN_PARAGRAPH_KEYWORD_OCCURRENCES`.
    pub fn resolve(&self) -> GeneratorSettings {
        let defaults = GeneratorSettings::default();
        let target_density = self
            .target_density
            .filter(|d| d.is_finite())
            .map(|d| d.clamp(MIN_KEYWORD_RATIO, MAX_KEYWORD_RATIO))
            .unwrap_or(defaults.target_density);
        let min_paragraph_keyword_occurrences = self
            .min_paragraph_keyword_occurrences
            .unwrap_or(defaults.min_paragraph_keyword_occurrences)
            .max(MIN_PARAGRAPH_KEYWORD_OCCURRENCES);

        GeneratorSettings {
            min_words: self.min_words.unwrap_or(defaults.min_words),
            target_density,
            min_paragraph_keyword_occurrences,
        }
    }
}

/// Paragraphs together with the stats of the final set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedCopy {
    pub paragraphs: Vec<String>,
    pub stats: KeywordStats,
}

/// Builds one paragraph from the sentence templates.
struct ParagraphBuilder<'a> {
    matcher: &'a KeywordMatcher,
    min_occurrences: usize,
}

impl ParagraphBuilder<'_> {
    fn build(&self, topic: &str, supporting_idea: &str) -> String {
        let keyword = self.matcher.keyword();
        let sentences = [
            format!(
                "{topic} sits at the heart of every {keyword} plan, and {supporting_idea} decides how fast a fresh character turns effort into progress."
            ),
            format!(
                "Players who map out {topic} before logging in waste less time, lean on {supporting_idea} when the pace drops, and keep weekly goals realistic."
            ),
            format!(
                "Treat {supporting_idea} as a habit, because small gains stacked across a long season beat any single lucky run."
            ),
            format!("Our {keyword} notes break {topic} into short steps that fit a busy evening."),
            format!(
                "Each {keyword} checkpoint explains what to finish first and what can safely wait until later in the week."
            ),
            format!(
                "When {topic} changes after a patch, the {keyword} tables are updated so the numbers stay trustworthy."
            ),
            format!("Bookmark this {keyword} overview and return whenever {topic} feels slow or confusing."),
        ];

        let mut paragraph = normalize_whitespace(&sentences.join(" "));
        let reinforcement = self.reinforcement(topic);
        // The reinforcement sentence opens with the keyword, so each pass adds a match.
        while self.matcher.count(&paragraph) < self.min_occurrences {
            paragraph.push(' ');
            paragraph.push_str(&reinforcement);
        }
        paragraph
    }

    fn reinforcement(&self, topic: &str) -> String {
        let keyword = self.matcher.keyword();
        normalize_whitespace(&format!(
            "{keyword} pilots keep {topic} steady so every Timerunner contributes to shared milestones."
        ))
    }

    /// Append reinforcement sentences until the paragraph on its own is denser
    /// than `target`. Returned unchanged when it already is, or when the
    /// sentence cannot get it there within [`MAX_DENSITY_REINFORCEMENTS`].
    fn densify(&self, mut paragraph: String, topic: &str, target: f64) -> String {
        let sentence = self.reinforcement(topic);
        let gain = self.matcher.count(&sentence) as f64 - target * count_words(&sentence) as f64;
        let deficit =
            target * count_words(&paragraph) as f64 - self.matcher.count(&paragraph) as f64;
        if deficit < 0.0 || gain <= 0.0 {
            return paragraph;
        }

        let needed = (deficit / gain).floor() + 1.0;
        if needed > MAX_DENSITY_REINFORCEMENTS as f64 {
            return paragraph;
        }
        for _ in 0..needed as usize {
            paragraph.push(' ');
            paragraph.push_str(&sentence);
        }
        paragraph
    }
}

/// Paragraphs plus running word and keyword totals.
///
/// Totals are summed per paragraph, so a match spanning a paragraph break only
/// shows up when the joined text is measured.
struct CopyBuffer<'a> {
    matcher: &'a KeywordMatcher,
    paragraphs: Vec<String>,
    sizes: Vec<(usize, usize)>,
    words: usize,
    hits: usize,
}

impl<'a> CopyBuffer<'a> {
    fn new(matcher: &'a KeywordMatcher) -> Self {
        Self {
            matcher,
            paragraphs: Vec::new(),
            sizes: Vec::new(),
            words: 0,
            hits: 0,
        }
    }

    fn push(&mut self, paragraph: String) {
        let (words, hits) = (count_words(&paragraph), self.matcher.count(&paragraph));
        self.words += words;
        self.hits += hits;
        self.sizes.push((words, hits));
        self.paragraphs.push(paragraph);
    }

    fn pop(&mut self) {
        if let Some((words, hits)) = self.sizes.pop() {
            self.words -= words;
            self.hits -= hits;
            self.paragraphs.pop();
        }
    }

    fn len(&self) -> usize {
        self.paragraphs.len()
    }

    fn stats(&self) -> KeywordStats {
        KeywordStats::from_counts(self.words, self.hits)
    }
}

/// Generate SEO copy for `keyword` around the given topics and supporting concepts.
///
/// Deterministic: the same arguments always yield the same paragraphs. Empty
/// topic or concept lists fall back to a generic entry.
pub fn build_keyword_rich_paragraphs<T, S>(
    keyword: &str,
    topics: &[T],
    supporting_concepts: &[S],
    options: &GeneratorOptions,
) -> Result<Vec<String>, SeoError>
where
    T: AsRef<str>,
    S: AsRef<str>,
{
    let matcher = KeywordMatcher::new(keyword)?;
    Ok(generate_with(&matcher, topics, supporting_concepts, options.resolve()))
}

/// Same as [`build_keyword_rich_paragraphs`] but also returns the final stats.
pub fn generate_copy<T, S>(
    keyword: &str,
    topics: &[T],
    supporting_concepts: &[S],
    options: &GeneratorOptions,
) -> Result<GeneratedCopy, SeoError>
where
    T: AsRef<str>,
    S: AsRef<str>,
{
    let matcher = KeywordMatcher::new(keyword)?;
    let paragraphs = generate_with(&matcher, topics, supporting_concepts, options.resolve());
    let stats = paragraph_stats(&paragraphs, &matcher);
    Ok(GeneratedCopy { paragraphs, stats })
}

/// Word count, keyword count and density of an existing paragraph set.
pub fn keyword_stats(paragraphs: &[String], keyword: &str) -> Result<KeywordStats, SeoError> {
    let matcher = KeywordMatcher::new(keyword)?;
    Ok(paragraph_stats(paragraphs, &matcher))
}

fn generate_with<T, S>(
    matcher: &KeywordMatcher,
    topics: &[T],
    supporting_concepts: &[S],
    settings: GeneratorSettings,
) -> Vec<String>
where
    T: AsRef<str>,
    S: AsRef<str>,
{
    let topics = or_default(topics, DEFAULT_TOPIC);
    let supports = or_default(supporting_concepts, DEFAULT_SUPPORTING_CONCEPT);
    let builder = ParagraphBuilder {
        matcher,
        min_occurrences: settings.min_paragraph_keyword_occurrences,
    };

    let mut copy = CopyBuffer::new(matcher);
    for (i, topic) in topics.iter().enumerate() {
        copy.push(builder.build(topic, supports[i % supports.len()]));
    }

    let mut rotation = 0;
    while copy.words < settings.min_words {
        let (topic, support) = labelled_pair(&topics, &supports, rotation, WORD_GROWTH_LABELS);
        copy.push(builder.build(&topic, &support));
        rotation += 1;
    }

    if copy.stats().density < settings.target_density {
        grow_density(&mut copy, &builder, &topics, &supports, &settings);
    }

    while copy.stats().density > MAX_KEYWORD_RATIO && copy.len() > 1 {
        copy.pop();
    }

    let stats = copy.stats();
    tracing::debug!(
        keyword = matcher.keyword(),
        paragraphs = copy.len(),
        words = stats.word_count,
        density = stats.density,
        "generated keyword copy"
    );
    copy.paragraphs
}

/// Words the density-growth phase may add on top of the word-growth output.
pub fn density_growth_budget(settings: &GeneratorSettings) -> usize {
    settings
        .min_words
        .max(MIN_PAGE_WORDS)
        .saturating_mul(DENSITY_GROWTH_WORD_FACTOR)
}

/// Append rotations of the "alignment"/"cadence" cycle until the target is met.
///
/// The cycle repeats forever, so the aggregate converges on the cycle's own
/// density: the target is only reachable when the cycle is denser than it.
/// Rotations are counted up front and capped by [`density_growth_budget`].
fn grow_density(
    copy: &mut CopyBuffer<'_>,
    builder: &ParagraphBuilder<'_>,
    topics: &[&str],
    supports: &[&str],
    settings: &GeneratorSettings,
) {
    let target = settings.target_density;
    let cycle_len = lcm(topics.len(), supports.len());
    let cycle: Vec<String> = (0..cycle_len)
        .map(|i| {
            let (topic, support) = labelled_pair(topics, supports, i, DENSITY_GROWTH_LABELS);
            builder.densify(builder.build(&topic, &support), &topic, target)
        })
        .collect();
    let (cycle_words, cycle_hits) = cycle.iter().fold((0, 0), |(w, k), p| {
        (w + count_words(p), k + builder.matcher.count(p))
    });

    let gain = cycle_hits as f64 - target * cycle_words as f64;
    if gain <= 0.0 {
        tracing::debug!(
            keyword = builder.matcher.keyword(),
            density = copy.stats().density,
            cycle_density = KeywordStats::from_counts(cycle_words, cycle_hits).density,
            target,
            "density target unreachable, skipping density growth"
        );
        return;
    }

    let deficit = target * copy.words as f64 - copy.hits as f64;
    let needed = (deficit / gain).ceil().max(0.0);
    let max_rotations = (density_growth_budget(settings) / cycle_words.max(1)).max(1);
    let rotations = if needed > max_rotations as f64 {
        tracing::debug!(
            keyword = builder.matcher.keyword(),
            needed,
            max_rotations,
            target,
            "density growth capped by word budget"
        );
        max_rotations
    } else {
        needed as usize
    };

    for paragraph in cycle.iter().cycle().take(rotations * cycle_len) {
        if copy.stats().density >= target {
            break;
        }
        copy.push(paragraph.clone());
    }
}

fn or_default<'a, T: AsRef<str>>(items: &'a [T], fallback: &'static str) -> Vec<&'a str> {
    if items.is_empty() {
        vec![fallback]
    } else {
        items.iter().map(|item| item.as_ref()).collect()
    }
}

fn labelled_pair(
    topics: &[&str],
    supports: &[&str],
    rotation: usize,
    (topic_suffix, support_suffix): (&str, &str),
) -> (String, String) {
    (
        format!("{} {topic_suffix}", topics[rotation % topics.len()]),
        format!("{} {support_suffix}", supports[rotation % supports.len()]),
    )
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn lcm(a: usize, b: usize) -> usize {
    a / gcd(a, b) * b
}
