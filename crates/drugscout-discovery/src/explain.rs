//! Templated per-gene explanations grounded in literature sentences.

/// Static biology prior for a gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneBiology {
    pub role: &'static str,
    pub mechanism: &'static str,
    pub impact: &'static str,
}

const GENERIC: GeneBiology = GeneBiology {
    role: "a disease-relevant molecular factor",
    mechanism: "disruption of cellular signaling pathways",
    impact: "disease progression",
};

const PRIORS: &[(&str, GeneBiology)] = &[
    ("NLRP3", GeneBiology {
        role: "a core component of the inflammasome complex",
        mechanism: "inflammasome activation and pro-inflammatory cytokine release",
        impact: "chronic neuroinflammation and microglial activation",
    }),
    ("PYCARD", GeneBiology {
        role: "an adaptor protein essential for inflammasome assembly",
        mechanism: "recruitment and oligomerization of inflammasome components",
        impact: "amplification of inflammatory signaling cascades",
    }),
    ("TLR2", GeneBiology {
        role: "a pattern recognition receptor of the innate immune system",
        mechanism: "recognition of pathogenic and damage-associated molecular patterns",
        impact: "initiation of immune and inflammatory responses",
    }),
    ("SOD1", GeneBiology {
        role: "a key antioxidant enzyme involved in reactive oxygen species detoxification",
        mechanism: "regulation of oxidative stress and protein stability",
        impact: "motor neuron toxicity and protein aggregation",
    }),
    ("C9ORF72", GeneBiology {
        role: "a regulator of vesicular trafficking and autophagy",
        mechanism: "repeat expansion-associated RNA toxicity and immune dysregulation",
        impact: "neuronal degeneration and neuroinflammatory vulnerability",
    }),
];

/// Literature sentences kept per explanation.
pub const MAX_EVIDENCE: usize = 4;
const MIN_SENTENCE_CHARS: usize = 50;

pub fn biology_for(gene: &str) -> GeneBiology {
    let upper = gene.to_uppercase();
    PRIORS
        .iter()
        .find(|(g, _)| *g == upper)
        .map(|(_, b)| *b)
        .unwrap_or(GENERIC)
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Whole sentences of at least 50 characters ending in `.`, `!` or `?`,
/// at most `max`.
pub fn clean_sentences(text: &str, max: usize) -> Vec<String> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut sentences = Vec::new();
    let mut start = 0;
    let mut prev_terminal = false;
    for (i, c) in collapsed.char_indices() {
        if c == ' ' && prev_terminal {
            sentences.push(&collapsed[start..i]);
            start = i + 1;
        }
        prev_terminal = is_terminal(c);
    }
    sentences.push(&collapsed[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| s.chars().count() >= MIN_SENTENCE_CHARS)
        .filter(|s| s.chars().last().is_some_and(is_terminal))
        .take(max)
        .map(String::from)
        .collect()
}

fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Multi-line explanation of why `gene` matters in `disease`. Never empty.
pub fn explain(gene: &str, disease: &str, literature_text: &str) -> String {
    let gene = match gene.trim() {
        "" => "the gene",
        g => g,
    };
    let disease = match disease.trim() {
        "" => "the disease",
        d => d,
    };
    let bio = biology_for(gene);

    let mut lines = vec![
        format!(
            "{} is implicated in {} primarily due to its role as {}, which directly influences key pathological processes associated with the disease.",
            capitalise(gene), disease, bio.role
        ),
        format!(
            "At a mechanistic level, {} contributes to {} through {}, leading to {} in affected tissues.",
            gene, disease, bio.mechanism, bio.impact
        ),
    ];

    let evidence = clean_sentences(literature_text, MAX_EVIDENCE);
    if evidence.is_empty() {
        lines.push(format!(
            "Although direct gene-specific abstracts were limited, converging evidence from functional studies and pathway-level analyses supports the involvement of {} in {}.",
            gene, disease
        ));
    } else {
        lines.push("Biomedical literature provides gene-specific evidence supporting this association:".to_string());
        lines.extend(evidence.into_iter().map(|e| format!("- {}", e)));
    }

    lines.push(format!(
        "In the context of {}, dysregulation of {} has been associated with altered cellular homeostasis, increased vulnerability to stress, and progressive pathology.",
        disease, gene
    ));
    lines.push(format!(
        "From a therapeutic standpoint, {} represents a compelling target because its modulation may attenuate {} and reduce downstream pathological effects.",
        gene, bio.mechanism
    ));
    lines.push(
        "Target-directed drug discovery approaches, including structure-guided design and bioactivity screening, enable systematic identification of compounds acting on this target."
            .to_string(),
    );
    lines.push(
        "Integration of ADMET and QSAR profiling further prioritizes candidates with favorable pharmacokinetic and safety properties."
            .to_string(),
    );
    lines.push(format!(
        "Collectively, this evidence-driven analysis highlights {} as a biologically meaningful and therapeutically actionable contributor to {}.",
        gene, disease
    ));

    lines.join("\n")
}
