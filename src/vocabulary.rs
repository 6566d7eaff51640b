//! Read-only domain vocabulary shared across the engine.
//!
//! Initialized once as compile-time constants and never mutated; the topic
//! extractor, explanation generator, and trend catalog all read from here.

/// Port-industry topic categories mapped to their characteristic phrases.
/// Matching is lowercase substring containment against free text.
pub const TOPIC_VOCABULARY: &[(&str, &[&str])] = &[
    (
        "port_management",
        &[
            "port management",
            "terminals",
            "logistics",
            "cargo handling",
            "warehousing",
        ],
    ),
    (
        "port_equipment",
        &["cranes", "gantries", "equipment", "automation", "robotics"],
    ),
    (
        "maritime_tech",
        &[
            "navigation",
            "maritime safety",
            "communication",
            "radar",
            "gps",
        ],
    ),
    (
        "green_energy",
        &[
            "offshore wind",
            "hydrogen",
            "batteries",
            "renewable energy",
        ],
    ),
    (
        "digitalization",
        &[
            "iot",
            "artificial intelligence",
            "big data",
            "digitalization",
            "sensors",
            "blockchain",
        ],
    ),
    (
        "regulations",
        &[
            "imo",
            "solas",
            "marpol",
            "compliance",
            "certification",
            "audit",
        ],
    ),
    (
        "logistics",
        &[
            "supply chain",
            "multimodal transport",
            "containers",
            "freight",
            "customs",
        ],
    ),
];

/// Lexicon driving the majority-vote sentiment call.
pub const POSITIVE_LEXICON: &[&str] = &[
    "innovation",
    "leader",
    "expert",
    "quality",
    "excellence",
    "performance",
];

pub const NEGATIVE_LEXICON: &[&str] = &["problem", "difficulty", "challenge", "limitation"];

/// Conversation starter per topic category, used when a common interest in
/// that category is detected.
pub const CONVERSATION_SUGGESTIONS: &[(&str, &str)] = &[
    ("port_management", "Port operations optimization"),
    ("port_equipment", "Next-generation terminal equipment"),
    ("maritime_tech", "Navigation and maritime safety systems"),
    ("green_energy", "Offshore renewable energy solutions"),
    ("digitalization", "Digital transformation of port operations"),
    ("regulations", "Evolving compliance requirements"),
    ("logistics", "Resilient supply chain design"),
];

/// Generic port-domain topics used to pad short conversation lists.
pub const GENERIC_CONVERSATION_TOPICS: &[&str] = &[
    "Emerging maritime technologies",
    "Recent international regulations",
    "Port market trends",
    "Sustainable development projects",
];
