//! The symptom checker's decision tree and a walker over it.
//!
//! The tree is fixed at build time: one root question naming the symptom,
//! one follow-up question per symptom, and a verdict behind every answer.

use crate::error::SymptomError;
use crate::types::enums::Severity;
use crate::types::symptom::{ChoiceView, Verdict, WalkStep};
use serde::Serialize;
use std::sync::LazyLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Question(Question),
    Result(Verdict),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub key: String,
    pub prompt: String,
    pub options: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub key: String,
    pub label: String,
    pub icon: String,
    pub next: Node,
}

impl Choice {
    /// Matches either the stable key or the Bangla label shown to users.
    pub fn accepts(&self, answer: &str) -> bool {
        let answer = answer.trim();
        self.key == answer || self.label == answer
    }
}

impl Question {
    pub fn option(&self, answer: &str) -> Option<&Choice> {
        self.options.iter().find(|choice| choice.accepts(answer))
    }
}

impl Node {
    pub fn step(&self) -> WalkStep {
        match self {
            Self::Question(question) => WalkStep::Question {
                key: question.key.clone(),
                prompt: question.prompt.clone(),
                options: question
                    .options
                    .iter()
                    .map(|choice| ChoiceView {
                        key: choice.key.clone(),
                        label: choice.label.clone(),
                        icon: choice.icon.clone(),
                    })
                    .collect(),
            },
            Self::Result(verdict) => WalkStep::Result {
                verdict: verdict.clone(),
            },
        }
    }
}

/// Summary of a two-level walk, in the shape a symptom check is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub symptom: String,
    pub sub_question: String,
    pub answer: String,
    pub verdict: Verdict,
}

static TREE: LazyLock<Node> = LazyLock::new(build_tree);

pub fn tree() -> &'static Node {
    &TREE
}

/// Cursor over a tree. Holds no state beyond the answers chosen so far.
#[derive(Debug, Clone)]
pub struct Walker<'t> {
    root: &'t Node,
    current: &'t Node,
    path: Vec<&'t Choice>,
}

impl<'t> Walker<'t> {
    pub fn new(root: &'t Node) -> Self {
        Self {
            root,
            current: root,
            path: Vec::new(),
        }
    }

    pub fn current(&self) -> &'t Node {
        self.current
    }

    pub fn choose(&mut self, answer: &str) -> Result<&'t Node, SymptomError> {
        let Node::Question(question) = self.current else {
            return Err(SymptomError::AlreadyConcluded);
        };
        let choice = question
            .option(answer)
            .ok_or_else(|| SymptomError::UnknownOption {
                prompt: question.prompt.clone(),
                value: answer.to_string(),
            })?;
        self.path.push(choice);
        self.current = &choice.next;
        Ok(self.current)
    }

    pub fn restart(&mut self) {
        self.current = self.root;
        self.path.clear();
    }

    pub fn path(&self) -> &[&'t Choice] {
        &self.path
    }
}

/// Replays `answers` from the root and reports where the interview stands.
pub fn walk<S: AsRef<str>>(answers: &[S]) -> Result<WalkStep, SymptomError> {
    let mut walker = Walker::new(tree());
    for answer in answers {
        walker.choose(answer.as_ref())?;
    }
    Ok(walker.current().step())
}

pub fn evaluate(symptom: &str, answer: &str) -> Result<Outcome, SymptomError> {
    let mut walker = Walker::new(tree());
    let Node::Question(follow_up) = walker.choose(symptom)? else {
        return Err(SymptomError::Incomplete);
    };
    let Node::Result(verdict) = walker.choose(answer)? else {
        return Err(SymptomError::Incomplete);
    };
    let [symptom_choice, answer_choice] = walker.path() else {
        return Err(SymptomError::Incomplete);
    };
    Ok(Outcome {
        symptom: symptom_choice.label.clone(),
        sub_question: follow_up.prompt.clone(),
        answer: answer_choice.label.clone(),
        verdict: verdict.clone(),
    })
}

fn verdict(severity: Severity, message: &str, icon: &str) -> Node {
    Node::Result(Verdict {
        severity,
        message: message.to_string(),
        icon: icon.to_string(),
    })
}

fn choice(key: &str, label: &str, icon: &str, next: Node) -> Choice {
    Choice {
        key: key.to_string(),
        label: label.to_string(),
        icon: icon.to_string(),
        next,
    }
}

fn question(key: &str, prompt: &str, options: Vec<Choice>) -> Node {
    Node::Question(Question {
        key: key.to_string(),
        prompt: prompt.to_string(),
        options,
    })
}

fn build_tree() -> Node {
    question(
        "symptom",
        "আপনার কোন সমস্যা আছে?",
        vec![
            choice(
                "fever",
                "জ্বর",
                "🤒",
                question(
                    "fever-duration",
                    "জ্বর কত দিন ধরে?",
                    vec![
                        choice(
                            "1-2-days",
                            "১-২ দিন",
                            "📅",
                            verdict(
                                Severity::Low,
                                "বিশ্রাম নিন ও পানি পান করুন। প্যারাসিটামল খেতে পারেন।",
                                "💊",
                            ),
                        ),
                        choice(
                            "over-3-days",
                            "৩ দিনের বেশি",
                            "⚠️",
                            verdict(
                                Severity::High,
                                "ডেঞ্জার সাইন! অবিলম্বে ডাক্তার দেখান।",
                                "🚨",
                            ),
                        ),
                    ],
                ),
            ),
            choice(
                "diarrhea",
                "ডায়রিয়া",
                "🚽",
                question(
                    "blood-in-stool",
                    "মলের সাথে রক্ত যাচ্ছে?",
                    vec![
                        choice(
                            "yes",
                            "হ্যাঁ",
                            "🚨",
                            verdict(
                                Severity::High,
                                "ডেঞ্জার সাইন! ওআরএস খান এবং অবিলম্বে হাসপাতালে যান।",
                                "🏥",
                            ),
                        ),
                        choice(
                            "no",
                            "না",
                            "✓",
                            verdict(
                                Severity::Medium,
                                "ওআরএস বানিয়ে পান করুন। ভাজাপোড়া ও মসলা এড়িয়ে চলুন।",
                                "🥤",
                            ),
                        ),
                    ],
                ),
            ),
            choice(
                "cough",
                "কাশি",
                "😷",
                question(
                    "breathing-difficulty",
                    "শ্বাস নিতে কষ্ট হচ্ছে?",
                    vec![
                        choice(
                            "yes",
                            "হ্যাঁ",
                            "🚨",
                            verdict(
                                Severity::High,
                                "ডেঞ্জার সাইন! নিউমোনিয়া হতে পারে। তাড়াতাড়ি ডাক্তার দেখান।",
                                "🏥",
                            ),
                        ),
                        choice(
                            "no",
                            "না",
                            "✓",
                            verdict(
                                Severity::Low,
                                "গরম পানি পান করুন। বিশ্রাম নিন। ২ সপ্তাহের বেশি হলে ডাক্তার দেখান।",
                                "☕",
                            ),
                        ),
                    ],
                ),
            ),
            choice(
                "stomach-pain",
                "পেট ব্যথা",
                "🤕",
                question(
                    "pain-severity",
                    "ব্যথা কতটা তীব্র?",
                    vec![
                        choice(
                            "severe",
                            "খুব তীব্র, সহ্য করতে পারছি না",
                            "🚨",
                            verdict(
                                Severity::High,
                                "ডেঞ্জার সাইন! অবিলম্বে হাসপাতালে যান। অ্যাপেন্ডিসাইটিস হতে পারে।",
                                "🏥",
                            ),
                        ),
                        choice(
                            "moderate",
                            "মাঝারি, সহ্য করতে পারছি",
                            "⚠️",
                            verdict(
                                Severity::Medium,
                                "হালকা খাবার খান। গ্যাসের সমস্যা হতে পারে। ভালো না হলে ডাক্তার দেখান।",
                                "🍵",
                            ),
                        ),
                    ],
                ),
            ),
        ],
    )
}
