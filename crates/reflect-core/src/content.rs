//! Read-only coping catalogue.
//!
//! Static lookup data for the tools pages. Nothing in the engine reads it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Anxiety,
    Stress,
    Depression,
    Bereavement,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ToolCard {
    pub heading: &'static str,
    pub body: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TopicContent {
    pub title: &'static str,
    pub intro: &'static str,
    pub show_breathing: bool,
    pub show_grounding: bool,
    pub extra_tools: &'static [ToolCard],
    pub prompts: &'static [&'static str],
}

/// 5-4-3-2-1 grounding exercise.
pub const GROUNDING_STEPS: [&str; 5] = [
    "5 things you can see",
    "4 things you can feel",
    "3 things you can hear",
    "2 things you can smell",
    "1 thing you can taste",
];

const ANXIETY: TopicContent = TopicContent {
    title: "Anxiety",
    intro: "A few gentle ideas you can try right now.",
    show_breathing: true,
    show_grounding: true,
    extra_tools: &[ToolCard {
        heading: "Worry container (1 minute)",
        body: &[
            "Write the worry in one sentence.",
            "Ask: can I act on this today? If yes, write one next step.",
            "If not, park it for later and return to what you are doing.",
        ],
    }],
    prompts: &[
        "What feels most loud in your mind right now?",
        "What would feel 5% easier in the next hour?",
    ],
};

const STRESS: TopicContent = TopicContent {
    title: "Stress",
    intro: "A small reset for your body and mind.",
    show_breathing: true,
    show_grounding: false,
    extra_tools: &[
        ToolCard {
            heading: "30-second body reset",
            body: &[
                "Drop your shoulders and unclench your jaw.",
                "Press your feet into the floor for 5 seconds.",
                "Slowly look left to right and notice three neutral objects.",
            ],
        },
        ToolCard {
            heading: "Three priorities (today)",
            body: &[
                "Pick one must-do.",
                "Pick one helpful thing.",
                "Pick one rest thing (even small).",
            ],
        },
    ],
    prompts: &[
        "What is one pressure I can lower slightly today?",
        "What would I tell a friend in the same situation?",
    ],
};

const DEPRESSION: TopicContent = TopicContent {
    title: "Depression",
    intro: "Small steps count. Choose what feels possible.",
    show_breathing: false,
    show_grounding: false,
    extra_tools: &[
        ToolCard {
            heading: "Tiny activation (pick one)",
            body: &[
                "Drink a glass of water.",
                "Open the curtains or step outside for 30 seconds.",
                "Wash your face or brush your teeth.",
                "Text one person: “Thinking of you.”",
            ],
        },
        ToolCard {
            heading: "Kind sentence",
            body: &[
                "Try: “This is hard, and I am doing my best today.”",
                "Or write your own sentence that feels believable.",
            ],
        },
    ],
    prompts: &[
        "What is the smallest thing I can do in the next 10 minutes?",
        "What would ‘good enough’ look like today?",
    ],
};

const BEREAVEMENT: TopicContent = TopicContent {
    title: "Bereavement",
    intro: "Grief is not a problem to solve. Go gently.",
    show_breathing: false,
    show_grounding: true,
    extra_tools: &[
        ToolCard {
            heading: "A grounding anchor",
            body: &[
                "Name one thing that is steady right now (a chair, the floor, your breath).",
                "Place a hand on your chest or stomach if that feels okay.",
                "Say: “This is grief. I can take the next minute.”",
            ],
        },
        ToolCard {
            heading: "Memory (only if it feels okay)",
            body: &[
                "Write one small memory (a moment, a phrase, a detail).",
                "Notice what comes up. There is no ‘right’ feeling.",
            ],
        },
    ],
    prompts: &[
        "What do I need most in this moment: comfort, space, or connection?",
        "If I could speak to them for one minute, what would I say?",
    ],
};

impl Topic {
    pub const ALL: [Topic; 4] = [
        Topic::Anxiety,
        Topic::Stress,
        Topic::Depression,
        Topic::Bereavement,
    ];

    pub fn content(self) -> &'static TopicContent {
        match self {
            Topic::Anxiety => &ANXIETY,
            Topic::Stress => &STRESS,
            Topic::Depression => &DEPRESSION,
            Topic::Bereavement => &BEREAVEMENT,
        }
    }
}
