// src/questionnaire.rs

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Number of the first answerable item on the printed form.
/// Items 1-5 are the identity block (name, age, gender, class, student id).
pub const FIRST_ITEM: u8 = 6;

/// Number of the last answerable item on the printed form.
pub const LAST_ITEM: u8 = 95;

/// Total number of answer fields on the form.
pub const ITEM_COUNT: usize = (LAST_ITEM - FIRST_ITEM + 1) as usize;

/// The honesty-check item. It instructs the respondent to pick the third
/// option and is excluded from scoring.
pub const HONESTY_ITEM: u8 = 41;

/// Frequency labels of the five-point scale, in rating order (1 through 5).
pub const SCALE: [&str; 5] = ["never", "rarely", "sometimes", "often", "always"];

/// One answer on the five-point frequency scale.
///
/// Serialized as its numeric value, so `{"6": 3}` in a submission maps to
/// `Rating::Sometimes` for item 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rating {
    Never = 1,
    Rarely = 2,
    Sometimes = 3,
    Often = 4,
    Always = 5,
}

impl Rating {
    /// Numeric value used for scoring and storage.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Frequency label shown on the form.
    pub fn label(self) -> &'static str {
        SCALE[(self.value() - 1) as usize]
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.value()
    }
}

impl TryFrom<u8> for Rating {
    type Error = InvalidRating;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Rating::Never),
            2 => Ok(Rating::Rarely),
            3 => Ok(Rating::Sometimes),
            4 => Ok(Rating::Often),
            5 => Ok(Rating::Always),
            other => Err(InvalidRating(other)),
        }
    }
}

/// Error for a rating value outside the 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRating(pub u8);

impl fmt::Display for InvalidRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rating must be between 1 and 5, got {}", self.0)
    }
}

impl std::error::Error for InvalidRating {}

/// Iterates the item numbers in form order.
pub fn item_numbers() -> impl Iterator<Item = u8> {
    FIRST_ITEM..=LAST_ITEM
}

/// Iterates `(item number, item text)` pairs in form order.
pub fn items() -> impl Iterator<Item = (u8, &'static str)> {
    item_numbers().zip(ITEM_TEXTS)
}

/// Returns the text of a printed item, or `None` for numbers off the form.
pub fn item_text(item: u8) -> Option<&'static str> {
    item_index(item).map(|index| ITEM_TEXTS[index])
}

fn item_index(item: u8) -> Option<usize> {
    (FIRST_ITEM..=LAST_ITEM)
        .contains(&item)
        .then(|| (item - FIRST_ITEM) as usize)
}

const HONESTY_INDEX: usize = (HONESTY_ITEM - FIRST_ITEM) as usize;

/// A complete set of answers, one per printed item, indexed by item number.
///
/// Submissions may omit items; `from_partial` fills the gaps with the
/// documented defaults so that everything downstream (storage, scoring)
/// only ever sees complete sheets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSheet {
    ratings: [Rating; ITEM_COUNT],
}

impl AnswerSheet {
    /// Builds a complete sheet from a possibly partial answer map.
    ///
    /// Items absent from the map default to `Never`; the honesty-check item
    /// defaults to `Sometimes`, the option its own text asks for. Item
    /// numbers off the form are rejected.
    pub fn from_partial(answers: &HashMap<u8, Rating>) -> Result<Self, AppError> {
        let mut ratings = [Rating::Never; ITEM_COUNT];
        ratings[HONESTY_INDEX] = Rating::Sometimes;

        for (&item, &rating) in answers {
            let Some(index) = item_index(item) else {
                return Err(AppError::Validation(format!(
                    "unknown questionnaire item: {} (expected {} through {})",
                    item, FIRST_ITEM, LAST_ITEM
                )));
            };
            ratings[index] = rating;
        }

        Ok(Self { ratings })
    }

    /// Wraps ratings already known to be complete, e.g. read back from storage.
    pub fn from_ratings(ratings: [Rating; ITEM_COUNT]) -> Self {
        Self { ratings }
    }

    /// Returns the rating for one item, or `None` for numbers off the form.
    pub fn get(&self, item: u8) -> Option<Rating> {
        item_index(item).map(|index| self.ratings[index])
    }

    /// Iterates `(item number, rating)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Rating)> + '_ {
        self.ratings
            .iter()
            .enumerate()
            .map(|(index, &rating)| (FIRST_ITEM + index as u8, rating))
    }
}

/// Item texts in form order, starting at item 6.
///
/// The wording follows the standard symptom checklist; item 41 is the
/// honesty check asking the respondent to pick the third option.
pub const ITEM_TEXTS: [&str; ITEM_COUNT] = [
    "Headaches",
    "Nervousness or shakiness inside",
    "Repeated unpleasant thoughts that won't leave your mind",
    "Faintness or dizziness",
    "Loss of sexual interest or pleasure",
    "Feeling critical of others",
    "The idea that someone else can control your thoughts",
    "Feeling others are to blame for most of your troubles",
    "Trouble remembering things",
    "Worried about sloppiness or carelessness",
    "Feeling easily annoyed or irritated",
    "Pains in heart or chest",
    "Feeling afraid in open spaces or on the streets",
    "Feeling low in energy or slowed down",
    "Thoughts of ending your life",
    "Hearing voices that other people do not hear",
    "Trembling",
    "Feeling that most people cannot be trusted",
    "Poor appetite",
    "Crying easily",
    "Feeling shy or uneasy with the opposite sex",
    "Feelings of being trapped or caught",
    "Suddenly scared for no reason",
    "Temper outbursts that you could not control",
    "Feeling afraid to go out of your house alone",
    "Blaming yourself for things",
    "Pains in lower back",
    "Feeling blocked in getting things done",
    "Feeling lonely",
    "Feeling blue",
    "Worrying too much about things",
    "Feeling no interest in things",
    "Feeling fearful",
    "Your feelings being easily hurt",
    "Other people being aware of your private thoughts",
    "I am completing this survey according to my true situation and feelings; please select the third option for this item",
    "Feeling others do not understand you or are unsympathetic",
    "Feeling that people are unfriendly or dislike you",
    "Having to do things very slowly to ensure correctness",
    "Heart pounding or racing",
    "Nausea or upset stomach",
    "Feeling inferior to others",
    "Soreness of your muscles",
    "Feeling that you are watched or talked about by others",
    "Trouble falling asleep",
    "Having to check and double-check what you do",
    "Difficulty making decisions",
    "Feeling afraid to travel on buses, subways, or trains",
    "Trouble getting your breath",
    "Hot or cold spells",
    "Having to avoid certain things, places, or activities because they frighten you",
    "Your mind going blank",
    "Numbness or tingling in parts of your body",
    "A lump in your throat",
    "Feeling hopeless about the future",
    "Trouble concentrating",
    "Feeling weak in parts of your body",
    "Feeling tense or keyed up",
    "Heavy feelings in your arms or legs",
    "Thoughts of death or dying",
    "Overeating",
    "Feeling uneasy when people are watching or talking about you",
    "Having thoughts that are not your own",
    "Having urges to beat, injure, or harm someone",
    "Awakening in the early morning",
    "Having to repeat the same actions such as touching, counting, or washing",
    "Sleep that is restless or disturbed",
    "Having urges to break or smash things",
    "Having ideas or beliefs that others do not share",
    "Feeling very self-conscious with others",
    "Feeling uneasy in crowds, such as shopping or at a movie",
    "Feeling everything is an effort",
    "Spells of terror or panic",
    "Feeling uncomfortable about eating or drinking in public",
    "Getting into frequent arguments",
    "Feeling nervous when you are left alone",
    "Others not giving you proper credit for your achievements",
    "Feeling lonely even when you are with people",
    "Feeling so restless you could not sit still",
    "Feelings of worthlessness",
    "The feeling that familiar things are strange or unreal",
    "Shouting or throwing things",
    "Feeling afraid you will faint in public",
    "Feeling that people will take advantage of you if you let them",
    "Being greatly bothered by thoughts about sex",
    "The idea that you should be punished for your mistakes",
    "Feeling pushed to get things done quickly",
    "The idea that something serious is wrong with your body",
    "Never feeling close to another person",
    "Feelings of guilt",
];
