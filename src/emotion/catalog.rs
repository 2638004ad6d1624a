//! Static emotion descriptors.
//!
//! Display text is Indonesian, matching the pages the service renders. The
//! keyword lists drive the heuristic predictor.

use serde::Serialize;

/// Presentation and scoring data attached to an emotion
#[derive(Debug, Clone, Serialize)]
pub struct EmotionInfo {
    /// Display name
    pub name: &'static str,
    /// Font Awesome icon class
    pub icon: &'static str,
    /// Hex color used by the result card
    pub color: &'static str,
    /// Long-form explanation shown with a result
    pub description: &'static str,
    /// Substrings counted by the keyword scorer
    pub keywords: &'static [&'static str],
}

pub const INFO_HAPPY: EmotionInfo = EmotionInfo {
    name: "Bahagia",
    icon: "fas fa-smile",
    color: "#ffd700",
    description: "Lirik ini mengekspresikan perasaan bahagia dan kegembiraan dengan nuansa \
                  positif yang kuat. Terdapat tema-tema tentang cinta, kebahagiaan, dan optimisme.",
    keywords: &[
        "bahagia",
        "senang",
        "gembira",
        "cinta",
        "suka",
        "tertawa",
        "tersenyum",
        "indah",
        "cantik",
        "amazing",
        "wonderful",
        "love",
    ],
};

pub const INFO_SAD: EmotionInfo = EmotionInfo {
    name: "Sedih",
    icon: "fas fa-sad-tear",
    color: "#87ceeb",
    description: "Lirik ini menggambarkan kesedihan mendalam, kehilangan, atau melankolis. \
                  Tema-tema tentang patah hati, kerinduan, dan emosi yang menyentuh.",
    keywords: &[
        "sedih",
        "menangis",
        "sakit",
        "hati",
        "rindu",
        "pergi",
        "tinggalkan",
        "hancur",
        "luka",
        "patah",
        "sepi",
        "sunyi",
    ],
};

pub const INFO_ANGRY: EmotionInfo = EmotionInfo {
    name: "Marah",
    icon: "fas fa-angry",
    color: "#ff6b6b",
    description: "Lirik ini mengandung kemarahan, frustrasi, atau emosi yang intens. \
                  Terdapat ekspresi ketidakpuasan, protes, atau pergolakan emosi.",
    keywords: &[
        "marah",
        "benci",
        "kesal",
        "muak",
        "geram",
        "jengkel",
        "kacau",
        "sialan",
        "bodoh",
        "tidak",
        "brengsek",
    ],
};

pub const INFO_FEARFUL: EmotionInfo = EmotionInfo {
    name: "Takut",
    icon: "fas fa-dizzy",
    color: "#dda0dd",
    description: "Lirik ini menunjukkan ketakutan, kecemasan, atau kekhawatiran. Tema-tema \
                  tentang ketidakpastian, ancaman, atau situasi yang menimbulkan rasa takut.",
    keywords: &[
        "takut",
        "khawatir",
        "cemas",
        "gelisah",
        "was-was",
        "panik",
        "ngeri",
        "seram",
        "menakutkan",
        "bahaya",
    ],
};
