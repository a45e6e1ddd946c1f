use vocab_types::{Difficulty, WordPair};

type Pair = (&'static str, &'static str);

static EASY_PAIRS: [Pair; 20] = [
    ("house", "ev"),
    ("water", "su"),
    ("book", "kitap"),
    ("friend", "arkadaş"),
    ("school", "okul"),
    ("teacher", "öğretmen"),
    ("student", "öğrenci"),
    ("family", "aile"),
    ("mother", "anne"),
    ("father", "baba"),
    ("brother", "erkek kardeş"),
    ("sister", "kız kardeş"),
    ("car", "araba"),
    ("door", "kapı"),
    ("window", "pencere"),
    ("table", "masa"),
    ("chair", "sandalye"),
    ("food", "yemek"),
    ("bread", "ekmek"),
    ("milk", "süt"),
];

static MEDIUM_PAIRS: [Pair; 20] = [
    ("happiness", "mutluluk"),
    ("sadness", "üzüntü"),
    ("knowledge", "bilgi"),
    ("experience", "deneyim"),
    ("opportunity", "fırsat"),
    ("challenge", "zorluk"),
    ("success", "başarı"),
    ("failure", "başarısızlık"),
    ("courage", "cesaret"),
    ("patience", "sabır"),
    ("responsibility", "sorumluluk"),
    ("freedom", "özgürlük"),
    ("justice", "adalet"),
    ("peace", "barış"),
    ("environment", "çevre"),
    ("technology", "teknoloji"),
    ("science", "bilim"),
    ("culture", "kültür"),
    ("history", "tarih"),
    ("future", "gelecek"),
];

static HARD_PAIRS: [Pair; 20] = [
    ("procrastination", "erteleme"),
    ("perseverance", "azim"),
    ("ambiguity", "belirsizlik"),
    ("phenomenon", "fenomen"),
    ("perspective", "bakış açısı"),
    ("contradiction", "çelişki"),
    ("hypothesis", "hipotez"),
    ("paradigm", "paradigma"),
    ("metaphor", "mecaz"),
    ("paradox", "paradoks"),
    ("synthesis", "sentez"),
    ("analysis", "analiz"),
    ("inference", "çıkarım"),
    ("deduction", "tümdengelim"),
    ("induction", "tümevarım"),
    ("correlation", "korelasyon"),
    ("causation", "nedensellik"),
    ("empirical", "ampirik"),
    ("theoretical", "teorik"),
    ("pragmatic", "pragmatik"),
];

/// English/Turkish pairs the door game draws from for a tier
pub fn word_pairs(difficulty: Difficulty) -> Vec<WordPair> {
    let pairs: &[Pair] = match difficulty {
        Difficulty::Easy => &EASY_PAIRS,
        Difficulty::Medium => &MEDIUM_PAIRS,
        Difficulty::Hard => &HARD_PAIRS,
    };

    pairs
        .iter()
        .map(|(english, turkish)| WordPair {
            english: english.to_string(),
            turkish: turkish.to_string(),
        })
        .collect()
}
