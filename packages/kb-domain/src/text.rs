use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Verbs that are dropped case-sensitively on top of the stop-word list.
pub const VERB_EXCEPTIONS: [&str; 2] = ["the", "does"];

const STOPWORDS: &[&str] = &[
	"a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
	"alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
	"amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
	"anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
	"becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
	"besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
	"cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
	"does", "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
	"elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
	"everywhere", "except", "few", "fifteen", "fify", "fill", "find", "fire", "first", "five",
	"for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
	"get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here", "hereafter",
	"hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his", "how", "however",
	"hundred", "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself",
	"keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many", "may", "me",
	"meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly", "move", "much",
	"must", "my", "myself", "name", "namely", "neither", "never", "nevertheless", "next", "nine",
	"no", "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off",
	"often", "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise", "our",
	"ours", "ourselves", "over", "own", "part", "per", "perhaps", "please", "put", "rather", "re",
	"same", "see", "seem", "seemed", "seeming", "seems", "serious", "several", "she", "should",
	"show", "side", "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone",
	"something", "sometime", "sometimes", "somewhere", "still", "such", "system", "take", "ten",
	"than", "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
	"thereby", "therefore", "therein", "thereupon", "these", "they", "thickv", "thin", "third",
	"this", "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
	"too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
	"upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
	"whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
	"wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
	"whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
	"yourself", "yourselves",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
	LazyLock::new(|| STOPWORDS.iter().copied().collect());
static PUNCTUATION: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"[()?.,"-]"#).expect("Punctuation pattern must compile."));

/// Pads `( ) ? . , "` and `-` with spaces so they tokenize on their own, then collapses
/// whitespace runs. Applying it twice yields the same string.
pub fn normalize(text: &str) -> String {
	let padded = PUNCTUATION.replace_all(text, " $0 ");

	collapse_whitespace(&padded)
}

/// Drops stop words from a query.
///
/// `?` is removed and `'` becomes a space first, so a possessive `'s` turns into the lone token
/// `s`, which is dropped as well. When nothing survives the input is returned unchanged.
pub fn remove_stopwords(sentence: &str) -> String {
	let cleaned = sentence.replace('?', "").replace('\'', " ");
	let kept = cleaned.split_whitespace().filter(|token| !is_stopword(token)).collect::<Vec<_>>();

	if kept.is_empty() {
		return sentence.to_string();
	}

	kept.join(" ")
}

pub fn is_stopword(token: &str) -> bool {
	token == "s"
		|| VERB_EXCEPTIONS.contains(&token)
		|| STOPWORD_SET.contains(token.to_lowercase().as_str())
}

/// Transliterates to the closest ASCII text.
///
/// Compatibility forms are decomposed and combining marks dropped first. Every other non-ASCII
/// character goes through the transliteration table, so `Москва` becomes `Moskva` and CJK
/// ideographs become pinyin syllables. Characters the table does not know are dropped.
pub fn fold_accents(text: &str) -> String {
	let mut out = String::with_capacity(text.len());

	for ch in text.nfkd() {
		if ch.is_ascii() {
			out.push(ch);

			continue;
		}
		if is_combining_mark(ch) {
			continue;
		}
		if let Some(replacement) = deunicode::deunicode_char(ch) {
			out.push_str(replacement);
		}
	}

	out
}

fn collapse_whitespace(text: &str) -> String {
	text.split_whitespace().collect::<Vec<_>>().join(" ")
}
