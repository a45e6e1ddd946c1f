//! Fixed narrative, themes and vocabulary for the story adventure.

use vocab_types::{Difficulty, VocabularyItem};

pub struct StoryTheme {
    pub setting: &'static str,
    pub character: &'static str,
    pub goal: &'static str,
    pub obstacle: &'static str,
    pub resolution: &'static str,
}

pub struct VocabSeed {
    pub word: &'static str,
    pub definition: &'static str,
    pub translation: &'static str,
}

impl VocabSeed {
    pub fn to_item(&self) -> VocabularyItem {
        VocabularyItem {
            word: self.word.to_string(),
            definition: self.definition.to_string(),
            translation: self.translation.to_string(),
        }
    }
}

const fn seed(word: &'static str, definition: &'static str, translation: &'static str) -> VocabSeed {
    VocabSeed {
        word,
        definition,
        translation,
    }
}

pub fn theme(difficulty: Difficulty) -> &'static StoryTheme {
    match difficulty {
        Difficulty::Easy => &EASY_THEME,
        Difficulty::Medium => &MEDIUM_THEME,
        Difficulty::Hard => &HARD_THEME,
    }
}

/// The four chapter texts for a tier, in order
pub fn chapters(difficulty: Difficulty) -> &'static [&'static str; 4] {
    match difficulty {
        Difficulty::Easy => &EASY_CHAPTERS,
        Difficulty::Medium => &MEDIUM_CHAPTERS,
        Difficulty::Hard => &HARD_CHAPTERS,
    }
}

/// Three vocabulary items per chapter
pub fn vocabulary(difficulty: Difficulty) -> &'static [[VocabSeed; 3]; 4] {
    match difficulty {
        Difficulty::Easy => &EASY_VOCABULARY,
        Difficulty::Medium => &MEDIUM_VOCABULARY,
        Difficulty::Hard => &HARD_VOCABULARY,
    }
}

/// Every translation across all tiers; wrong answers are drawn from here.
/// "gizemli" appears twice, callers de-duplicate.
pub const TRANSLATION_POOL: [&str; 36] = [
    "hazine", "gizemli", "kıyısal", "antik", "deniz feneri", "muhteşem",
    "heyecan", "keşif", "yolculuk", "macera", "gizli", "tarihsel",
    "şifreli", "metropol", "gizemli", "aile yadigarı", "şifre çözmek", "miras",
    "soy", "ifşaat", "çözmek", "kimlik", "uzlaştırma", "kapanış",
    "fenomen", "sefer", "uydu", "emsalsiz", "anomali", "hipotez",
    "kazı", "terk edilmiş", "tesis", "atılım", "çıkarımlar", "paradigmalar",
];

static EASY_THEME: StoryTheme = StoryTheme {
    setting: "a coastal town",
    character: "Ali",
    goal: "find a hidden treasure",
    obstacle: "mysterious map",
    resolution: "ancient lighthouse",
};

static MEDIUM_THEME: StoryTheme = StoryTheme {
    setting: "a bustling metropolis",
    character: "Mert",
    goal: "solve an old family mystery",
    obstacle: "encrypted journal entries",
    resolution: "forgotten family heirloom",
};

static HARD_THEME: StoryTheme = StoryTheme {
    setting: "a remote research station in Antarctica",
    character: "Dr. Taner",
    goal: "discover the source of strange signals",
    obstacle: "extreme weather conditions",
    resolution: "abandoned underground facility",
};

static EASY_CHAPTERS: [&str; 4] = [
    "It was a beautiful summer day and Ali had just arrived in a coastal town. As the salty sea breeze filled the air, Ali was walking along the beach. While exploring the shore, he found a mysterious map partially buried in the sand. This map seemed to point to a hidden treasure somewhere nearby.",
    "The next morning, Ali decided to follow the clues on the map. It led him to an ancient lighthouse rising on rocky slopes. The structure was old but still looked magnificent against the blue sky. As Ali approached, it was clear that this lighthouse held more secrets than expected.",
    "The journey through the lighthouse revealed a series of secret rooms. Each room contained a clue that Ali carefully collected. With each discovery, the excitement grew, making the quest even more interesting. By sunset, all the clues needed to proceed had been gathered.",
    "Following the final clues, Ali descended to a hidden chamber beneath the lighthouse. There, a treasure chest stood concealed behind an ancient stone wall. The adventure had been challenging, but Ali was proud to have completed the mission. Inside the chest was not gold, but something much more valuable: a collection of historical artifacts telling the story of the town's founders.",
];

static MEDIUM_CHAPTERS: [&str; 4] = [
    "Mert returned to a bustling metropolis after many years. What drew him back was a letter containing encrypted journal entries. The pages were filled with references to family secrets and a mysterious past. The crowded streets and tall buildings of the metropolitan area had changed, but the family mystery remained unsolved.",
    "Determined to decode the encrypted messages in the journal, Mert began investigating. The clues led to an old family home where a forgotten family heirloom was said to be hidden. The search through dusty attics and sealed rooms revealed clues about the family's legacy and significance.",
    "As Mert continued to decipher the journal entries, each revelation brought new questions about the family's ancestry. Old photographs, letters, and documents painted a picture of a complex family history filled with both triumph and tragedy. The pieces of the puzzle slowly began to come together.",
    "In the final pages of the journal, Mert discovered the location of the family heirloom: a hidden safe behind a portrait in the library. Inside was not only the precious heirloom but also documents reconciling conflicting accounts of the family history. With this legacy uncovered, Mert found closure and a new understanding of his identity.",
];

static HARD_CHAPTERS: [&str; 4] = [
    "Dr. Taner arrived at a remote research station in Antarctica to investigate a strange phenomenon detected by satellite. The team's expedition had been planned for months, but nothing could prepare them for what they would find. Despite the extreme weather conditions, they set up their equipment and began monitoring the signals.",
    "The data revealed an anomaly that had never been recorded before. Dr. Taner developed a hypothesis and suggested that the signals might be coming from beneath the ice. The team faced unprecedented challenges as they prepared to drill through the thick Antarctic ice sheet to investigate further.",
    "After days of careful work, the team drilled through to discover a hidden facility in the depths of the ice. The excavation revealed a research station abandoned decades ago. Each revelation brought more questions about what kind of experiments were conducted there and why it was abandoned in such haste.",
    "In the lowest level of the facility, Dr. Taner made a breakthrough discovery: evidence of advanced technology that had been developed and then hidden from the world. The implications of this finding would forever change scientific paradigms. As they documented everything, the team realized they had discovered something that would rewrite the history books.",
];

static EASY_VOCABULARY: [[VocabSeed; 3]; 4] = [
    [
        seed("treasure", "a quantity of precious metals, gems, or other valuable objects", "hazine"),
        seed("mysterious", "difficult or impossible to understand, explain, or identify", "gizemli"),
        seed("coastal", "of or relating to a coast", "kıyısal"),
    ],
    [
        seed("ancient", "belonging to the very distant past and no longer in existence", "antik"),
        seed("lighthouse", "a tower or other structure with a powerful light designed to guide ships", "deniz feneri"),
        seed("magnificent", "extremely beautiful and impressive", "muhteşem"),
    ],
    [
        seed("excitement", "a feeling of great enthusiasm and eagerness", "heyecan"),
        seed("discovery", "the action or process of finding something that was previously unknown", "keşif"),
        seed("journey", "an act of traveling from one place to another", "yolculuk"),
    ],
    [
        seed("adventure", "an unusual and exciting, typically hazardous, experience or activity", "macera"),
        seed("concealed", "kept secret; hidden from sight", "gizli"),
        seed("historical", "of or concerning history or past events", "tarihsel"),
    ],
];

static MEDIUM_VOCABULARY: [[VocabSeed; 3]; 4] = [
    [
        seed("encrypted", "converted information into a coded form to prevent unauthorized access", "şifreli"),
        seed("metropolis", "a very large and busy city", "metropol"),
        seed("mysterious", "difficult or impossible to understand, explain, or identify", "gizemli"),
    ],
    [
        seed("heirloom", "a valuable object that has belonged to a family for several generations", "aile yadigarı"),
        seed("decode", "convert a coded message into intelligible language", "şifre çözmek"),
        seed("legacy", "something left or handed down by a predecessor", "miras"),
    ],
    [
        seed("ancestry", "one's family or ethnic descent", "soy"),
        seed("revelation", "a surprising and previously unknown fact that has been disclosed", "ifşaat"),
        seed("decipher", "succeed in understanding, interpreting, or identifying", "çözmek"),
    ],
    [
        seed("identity", "the fact of being who or what a person or thing is", "kimlik"),
        seed("reconciling", "making one view or belief compatible with another", "uzlaştırma"),
        seed("closure", "a feeling that an emotional or traumatic experience has been resolved", "kapanış"),
    ],
];

static HARD_VOCABULARY: [[VocabSeed; 3]; 4] = [
    [
        seed("phenomenon", "a fact or situation that is observed to exist or happen, especially one whose cause or explanation is in question", "fenomen"),
        seed("expedition", "a journey undertaken by a group of people with a particular purpose", "sefer"),
        seed("satellite", "an artificial body placed in orbit around the earth or moon or another planet", "uydu"),
    ],
    [
        seed("unprecedented", "never done or known before", "emsalsiz"),
        seed("anomaly", "something that deviates from what is standard, normal, or expected", "anomali"),
        seed("hypothesis", "a supposition or proposed explanation made on the basis of limited evidence", "hipotez"),
    ],
    [
        seed("excavation", "the action of excavating something, especially an archaeological site", "kazı"),
        seed("abandoned", "having been deserted or left", "terk edilmiş"),
        seed("facility", "a place, amenity, or piece of equipment provided for a particular purpose", "tesis"),
    ],
    [
        seed("breakthrough", "a sudden, dramatic, and important discovery or development", "atılım"),
        seed("implications", "the conclusion that can be drawn from something although it is not explicitly stated", "çıkarımlar"),
        seed("paradigms", "a typical example or pattern of something; a model", "paradigmalar"),
    ],
];
