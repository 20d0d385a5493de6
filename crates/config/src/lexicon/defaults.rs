//! Built-in lexicon for the engineering QA/QC domain
//!
//! Covers welding qualification, heat exchangers, NDT methods, pressure
//! vessels and piping. Intent and context patterns accept English, Romanized
//! Hindi and Devanagari phrasing.

use std::collections::BTreeMap;

use super::contexts::{ContextPatternEntry, DifficultyRegister};
use super::entities::{to_strings, EntitySemanticEntry, ExpansionRule, PartialTerm};
use super::intents::{IntentPatternEntry, QuestionIntent};
use super::LexiconConfig;

pub(super) fn builtin() -> LexiconConfig {
    LexiconConfig {
        entities: entities(),
        intents: intents(),
        contexts: contexts(),
        expansion_rules: expansion_rules(),
        intent_keywords: string_table(INTENT_KEYWORDS),
        category_keywords: string_table(CATEGORY_KEYWORDS),
        difficulty: DifficultyRegister {
            basic_markers: to_strings(&[
                "basic", "simple", "easy", "beginner", "saral", "aasan", "asaan", "सरल", "आसान",
            ]),
            advanced_markers: to_strings(&[
                "advanced", "detail", "detailed", "in depth", "complex", "vistar", "vistaar",
                "विस्तार",
            ]),
        },
        fuzzy_excluded_words: to_strings(&[
            "what", "that", "then", "than", "this", "they", "when", "where", "which", "with",
            "have", "here", "there", "these", "those", "type", "types", "kaha", "kahan", "haal",
            "hota", "hoti", "hote", "kaise", "kaisa", "kaisi", "karte", "karta", "karti", "wala",
            "wali", "wale", "kitna", "kitni", "kyon", "kyun", "matlab",
        ]),
    }
}

fn entities() -> BTreeMap<String, EntitySemanticEntry> {
    let tube_rule = ExpansionRule::adjacent(&[
        ("bundle", "heat exchanger tube bundle"),
        ("sheet", "tubesheet"),
        ("side", "tube side heat exchanger"),
    ]);

    let entries = [
        (
            "welding_procedure_specification",
            EntitySemanticEntry::new(&["welding procedure specification"])
                .with_abbreviations(&["wps"])
                .with_typos(&[
                    "welding procedure specfication",
                    "welding procedure spesification",
                    "welding procedure specificaton",
                ])
                .with_related(&["welding procedure", "वेल्डिंग प्रक्रिया"])
                .with_partial(PartialTerm::weak("specification")),
        ),
        (
            "procedure_qualification_record",
            EntitySemanticEntry::new(&["procedure qualification record"])
                .with_abbreviations(&["pqr"])
                .with_typos(&["procedure qualificaton record", "procedure qualification recrod"])
                .with_related(&["procedure qualification", "qualification test coupon"])
                .with_partial(PartialTerm::weak("qualification"))
                .with_partial(PartialTerm::weak("record")),
        ),
        (
            "welder_performance_qualification",
            EntitySemanticEntry::new(&["welder performance qualification", "welder qualification"])
                .with_abbreviations(&["wpq"])
                .with_typos(&["welder performence qualification", "welder qualificaton"])
                .with_related(&["welder test", "welder certification"])
                .with_partial(PartialTerm::weak("welder"))
                .with_partial(PartialTerm::weak("performance")),
        ),
        (
            "heat_exchanger",
            EntitySemanticEntry::new(&["heat exchanger", "हीट एक्सचेंजर"])
                .with_abbreviations(&["hx"])
                .with_typos(&[
                    "heat excanger",
                    "heat exchager",
                    "heat exhanger",
                    "heat exchnager",
                    "heat exchangar",
                ])
                .with_related(&["shell and tube", "cooler", "condenser"])
                .with_partial(PartialTerm::strong("exchanger")),
        ),
        (
            "tube_bundle",
            EntitySemanticEntry::new(&["tube bundle"])
                .with_typos(&["tube bundel", "tube bundal"])
                .with_related(&["bundle pulling", "bundle extraction"])
                .with_partial(PartialTerm::weak("tube").with_rule(tube_rule.clone()))
                .with_partial(PartialTerm::strong("bundle")),
        ),
        (
            "tube_sheet",
            EntitySemanticEntry::new(&["tube sheet", "tubesheet"])
                .with_typos(&["tube sheat", "tubesheat"])
                .with_related(&["tube plate", "tube to tubesheet"])
                .with_partial(PartialTerm::weak("tube").with_rule(tube_rule))
                .with_partial(PartialTerm::weak("sheet")),
        ),
        (
            "baffle",
            EntitySemanticEntry::new(&["baffle"])
                .with_typos(&["baffel", "bafle"])
                .with_related(&["support plate", "segmental plate"]),
        ),
        (
            "gasket",
            EntitySemanticEntry::new(&["gasket", "गैस्केट"])
                .with_typos(&["gaskit", "gascket"])
                .with_related(&["packing", "seal ring"]),
        ),
        (
            "flange",
            EntitySemanticEntry::new(&["flange", "फ्लेंज"])
                .with_typos(&["flang", "falnge", "flenge"])
                .with_related(&["blind", "spool"]),
        ),
        (
            "nozzle",
            EntitySemanticEntry::new(&["nozzle"])
                .with_typos(&["nozle", "nozzel"])
                .with_related(&["branch connection", "reinforcement pad"]),
        ),
        (
            "penetrant_testing",
            EntitySemanticEntry::new(&["penetrant testing", "dye penetrant", "liquid penetrant"])
                .with_abbreviations(&["dpt", "lpt"])
                .with_typos(&["penetrent testing", "dye penitrant", "die penetrant"])
                .with_related(&["penetrant", "developer"]),
        ),
        (
            "radiography_testing",
            EntitySemanticEntry::new(&["radiography testing", "radiographic testing", "radiography"])
                .with_abbreviations(&["rt"])
                .with_typos(&["radiograpy", "radiografy", "radiogrphy"])
                .with_related(&["x ray", "gamma ray", "film density"]),
        ),
        (
            "ultrasonic_testing",
            EntitySemanticEntry::new(&["ultrasonic testing", "ultrasonic"])
                .with_abbreviations(&["ut"])
                .with_typos(&["ultrasonik", "ultra sonic", "ultrasound testing"])
                .with_related(&["thickness gauging", "sound wave", "probe"]),
        ),
        (
            "magnetic_particle_testing",
            EntitySemanticEntry::new(&["magnetic particle testing", "magnetic particle"])
                .with_abbreviations(&["mpi"])
                .with_typos(&["magnetic partical", "magnatic particle"])
                .with_related(&["yoke", "magnetic flux"]),
        ),
        (
            "non_destructive_testing",
            EntitySemanticEntry::new(&["non destructive testing", "nondestructive testing"])
                .with_abbreviations(&["ndt", "nde"])
                .with_typos(&["non distructive", "non destructve", "nondistructive"])
                .with_related(&["inspection method", "testing method"]),
        ),
        (
            "hydrostatic_test",
            EntitySemanticEntry::new(&["hydrostatic test", "hydro test", "hydrotest"])
                .with_typos(&["hydrostatic tset", "hydrostatik", "hydro tset"])
                .with_related(&["pressure test", "leak test"])
                .with_partial(PartialTerm::strong("hydrostatic")),
        ),
        (
            "post_weld_heat_treatment",
            EntitySemanticEntry::new(&["post weld heat treatment"])
                .with_abbreviations(&["pwht"])
                .with_typos(&["post weld heat treatmnet", "postweld heat treatment"])
                .with_related(&["stress relieving", "stress relief"])
                .with_partial(PartialTerm::strong("heat treatment")),
        ),
        (
            "pressure_vessel",
            EntitySemanticEntry::new(&["pressure vessel", "प्रेशर वेसल"])
                .with_typos(&["pressure vesel", "presure vessel", "pressure vessle"])
                .with_related(&["vessel", "drum", "reactor"]),
        ),
        (
            "porosity",
            EntitySemanticEntry::new(&["porosity"])
                .with_typos(&["porosty", "porocity"])
                .with_related(&["blow hole", "blowhole", "gas pore"]),
        ),
        (
            "corrosion",
            EntitySemanticEntry::new(&["corrosion", "जंग"])
                .with_typos(&["corossion", "corrosian", "corrossion"])
                .with_related(&["rust", "jung", "pitting"]),
        ),
        (
            "safety_valve",
            EntitySemanticEntry::new(&["safety valve", "pressure safety valve", "relief valve"])
                .with_abbreviations(&["psv", "prv"])
                .with_typos(&["safty valve", "saftey valve"])
                .with_related(&["pop test", "set pressure"]),
        ),
    ];

    entries
        .into_iter()
        .map(|(key, entry)| (key.to_string(), entry))
        .collect()
}

fn expansion_rules() -> BTreeMap<String, ExpansionRule> {
    let mut rules = BTreeMap::new();

    rules.insert(
        "pt".to_string(),
        ExpansionRule::context(&[
            (
                &["dye", "penetrant", "liquid", "developer", "surface", "crack"][..],
                "penetrant testing",
            ),
            (
                &["pressure", "hydro", "hydrostatic", "leak", "vessel"][..],
                "pressure test",
            ),
        ]),
    );
    rules.insert(
        "mt".to_string(),
        ExpansionRule::context(&[(
            &["magnetic", "yoke", "particle", "flux", "ferromagnetic"][..],
            "magnetic particle testing",
        )]),
    );
    rules.insert(
        "pv".to_string(),
        ExpansionRule::context(&[(
            &["pressure", "vessel", "shell", "drum", "design", "asme"][..],
            "pressure vessel",
        )]),
    );
    rules.insert(
        "tube".to_string(),
        ExpansionRule::adjacent(&[
            ("bundle", "heat exchanger tube bundle"),
            ("sheet", "tubesheet"),
            ("side", "tube side heat exchanger"),
        ]),
    );

    for generic in ["test", "testing", "weld", "pipe", "valve", "plate", "sheet"] {
        rules.insert(generic.to_string(), ExpansionRule::Never);
    }

    rules
}

const INTENT_KEYWORDS: &[(&str, &[&str])] = &[
    ("matlab", &["kya hai", "definition", "meaning"]),
    ("meaning", &["definition", "matlab"]),
    ("kaise", &["how"]),
    ("kaam", &["working", "work"]),
    ("farak", &["difference"]),
    ("fark", &["difference"]),
    ("antar", &["difference"]),
    ("prakar", &["types"]),
    ("kyon", &["why", "cause"]),
    ("kyun", &["why", "cause"]),
    ("upyog", &["use", "application"]),
    ("tarika", &["procedure", "method"]),
    ("suraksha", &["safety"]),
    ("pehchan", &["identify"]),
];

const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "welding",
        &["weld", "welding", "welder", "wps", "pqr", "wpq", "pwht", "electrode", "porosity"],
    ),
    (
        "heat_exchanger",
        &["heat exchanger", "tube", "baffle", "shell", "bundle", "tubesheet"],
    ),
    (
        "ndt",
        &["ndt", "ultrasonic", "radiography", "penetrant", "magnetic", "inspection"],
    ),
    (
        "pressure_vessel",
        &["pressure vessel", "hydrostatic", "hydro test", "nozzle", "vessel"],
    ),
    ("piping", &["pipe", "piping", "flange", "gasket", "spool"]),
    ("safety", &["safety", "ppe", "hazard", "relief valve", "psv", "suraksha"]),
    ("corrosion", &["corrosion", "rust", "coating", "pitting", "jung"]),
];

fn string_table(table: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    table
        .iter()
        .map(|(key, values)| (key.to_string(), to_strings(values)))
        .collect()
}

fn intents() -> Vec<IntentPatternEntry> {
    use QuestionIntent::*;

    vec![
        IntentPatternEntry::new(
            Definition,
            &[
                r"\b(matlab|meaning|definition|define)\b",
                r"\bwhat\s+(is|are)\b",
                r"\bkya\s+(hota|hoti|hote)\b",
                r"मतलब|परिभाषा|क्या\s+होता",
            ],
            &[r"\bkya\s+(hai|hain)\b", r"\bexplain\b", r"क्या\s+है"],
            &[r"\b(ka|ki|ke)\s+matlab\b", r"\bkya\s+(hai|hain)\b"],
        ),
        IntentPatternEntry::new(
            Working,
            &[
                r"\bkaise\s+(kaam|work)",
                r"\bhow\s+does\b.*\bwork",
                r"\b(working|principle)\b",
                r"कैसे\s+काम",
            ],
            &[r"\b(kaise|how|function)\b", r"कैसे"],
            &[r"\bkaam\s+kar", r"\bkarta\s+hai\b", r"\bprinciple\b"],
        ),
        IntentPatternEntry::new(
            Procedure,
            &[
                r"\b(procedure|process|steps?)\b",
                r"\bkaise\s+(kare|karen|karte|kiya|kiye)\b",
                r"\bhow\s+to\b",
                r"प्रक्रिया|तरीका",
            ],
            &[r"\b(method|tarika|tareeka|vidhi)\b"],
            &[r"\b(first|pehle|then|phir|sequence)\b"],
        ),
        IntentPatternEntry::new(
            Repair,
            &[r"\b(repair\w*|fix\w*|theek|thik|sudhar\w*)\b", r"मरम्मत|ठीक"],
            &[r"\b(replace\w*|rework|maintenance)\b"],
            &[r"\b(kharab|damaged?|broken|toot\w*)\b"],
        ),
        IntentPatternEntry::new(
            Problem,
            &[r"\b(problem|issue|samasya|dikkat|fault|failure)\b", r"समस्या|दिक्कत"],
            &[r"\b(leak\w*|crack\w*|defect\w*)\b"],
            &[r"\b(ho\s+jaye|ho\s+gaya|aa\s+raha)\b"],
        ),
        IntentPatternEntry::new(
            Identification,
            &[
                r"\b(identify|pehchan\w*|detect|recogni[sz]e)\b",
                r"\bkaise\s+pata\b",
                r"पहचान",
            ],
            &[r"\b(signs?|symptoms?|dikhta|dikhti)\b"],
            &[r"\b(visual\w*|dekh\w*)\b"],
        ),
        IntentPatternEntry::new(
            Decision,
            &[r"\b(accept\w*|reject\w*|criteria|allowed|permissible)\b", r"स्वीकार"],
            &[r"\b(should|chahiye|limit|ok)\b"],
            &[r"\b(pass|fail|standard|code)\b"],
        ),
        IntentPatternEntry::new(
            Comparison,
            &[
                r"\b(difference|differ|vs|versus|compar\w*|farak|fark|antar)\b",
                r"अंतर|फर्क",
            ],
            &[r"\b(better|behtar)\b"],
            &[r"\b(between|beech)\b"],
        ),
        IntentPatternEntry::new(
            Application,
            &[
                r"\b(applications?|uses|upyog|istemal)\b",
                r"\bkahan\s+(use|lagta|lagaya)",
                r"उपयोग|इस्तेमाल",
            ],
            &[r"\b(used|use|where|kahan)\b"],
            &[r"\b(industry|plant|field)\b"],
        ),
        IntentPatternEntry::new(
            Types,
            &[r"\b(types?|kinds?|prakar|kism)\b", r"प्रकार"],
            &[r"\b(categories|classification)\b"],
            &[r"\b(kitne|how\s+many)\b"],
        ),
        IntentPatternEntry::new(
            Causes,
            &[r"\b(causes?|caused|reasons?|kyon|kyun|karan|why)\b", r"क्यों|कारण"],
            &[r"\b(due\s+to|because)\b"],
            &[r"\b(hota\s+hai|hoti\s+hai)\b"],
        ),
        IntentPatternEntry::new(
            Safety,
            &[r"\b(safety|safe|suraksha|hazards?|precautions?)\b", r"सुरक्षा"],
            &[r"\b(ppe|danger\w*|risk)\b"],
            &[r"\b(dhyan|care|avoid)\b"],
        ),
    ]
}

fn contexts() -> Vec<ContextPatternEntry> {
    vec![
        ContextPatternEntry::new(
            "conditional_damage",
            "conditional-damage",
            &[
                r"\bagar\b.*\b(kharab|damage\w*|crack\w*|leak\w*|toot\w*|fail\w*)",
                r"\bif\b.*\b(damage\w*|crack\w*|leak\w*|fail\w*|broken)",
                r"अगर.*(खराब|टूट)",
            ],
        ),
        ContextPatternEntry::new(
            "during_operation",
            "during-operation",
            &[
                r"\b(during|while)\s+(operation|running|service)\b",
                r"\b(chalte|chalu)\s+(samay|waqt|mein)\b",
                r"\boperation\s+(ke\s+)?(dauran|time)\b",
            ],
        ),
        ContextPatternEntry::new(
            "before_installation",
            "before-installation",
            &[
                r"\bbefore\s+(install\w*|fitting|erection)\b",
                r"\b(install\w*|lagane|fitting)\s+(se\s+)?pehle\b",
            ],
        ),
        ContextPatternEntry::new(
            "after_installation",
            "after-installation",
            &[
                r"\bafter\s+(install\w*|fitting|erection)\b",
                r"\b(install\w*|lagane|fitting)\s+(ke\s+)?baad\b",
            ],
        ),
        ContextPatternEntry::new(
            "regular_check",
            "regular-check",
            &[r"\b(regular|routine|periodic|daily|weekly|monthly|rozana)\b"],
        ),
        ContextPatternEntry::new(
            "first_time_check",
            "first-time-check",
            &[r"\b(first\s+time|pehli\s+baar|initial|commissioning)\b"],
        ),
    ]
}
