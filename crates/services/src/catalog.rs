//! Courses bundled with the game.

use quest_core::model::{Chapter, Course, CourseError, CourseId, Question};

#[derive(Debug, Clone)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    #[must_use]
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    #[must_use]
    pub fn get(&self, id: &CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id() == id)
    }
}

fn question(
    prompt: &str,
    choices: &[&str],
    answer: usize,
    explanation: &str,
) -> Result<Question, CourseError> {
    let choices = choices.iter().map(|c| (*c).to_string()).collect();
    Ok(Question::new(prompt, choices, answer)?.with_explanation(explanation))
}

fn story(paragraphs: &[&str]) -> Vec<String> {
    paragraphs.iter().map(|p| (*p).to_string()).collect()
}

fn fractions() -> Result<Course, CourseError> {
    let bakery = Chapter::new(
        "The Pizza Bakery",
        story(&[
            "The royal baker has cut the king's pizza into equal slices.",
            "Help the baker share them fairly before the guests arrive.",
        ]),
        vec![
            question(
                "A pizza is cut into 8 slices and you eat 2. What fraction did you eat?",
                &["1/8", "2/8", "6/8", "8/2"],
                1,
                "Two of eight equal slices is 2/8.",
            )?,
            question(
                "Which fraction is the same as 1/2?",
                &["2/4", "1/4", "2/3", "3/4"],
                0,
                "Doubling top and bottom of 1/2 gives 2/4.",
            )?,
            question(
                "Which is bigger: 1/3 or 1/4?",
                &["1/3", "1/4", "They are equal"],
                0,
                "Fewer slices means each slice is bigger.",
            )?,
        ],
    );

    let market = Chapter::new(
        "The Market Bridge",
        story(&[
            "The bridge keeper only lets travellers pass who can add fractions.",
            "The river is rising, so answer quickly.",
        ]),
        vec![
            question(
                "What is 1/4 + 1/4?",
                &["1/8", "2/4", "2/8", "1/16"],
                1,
                "Same bottom number: add the tops.",
            )?,
            question(
                "What is 3/5 - 1/5?",
                &["2/5", "2/0", "4/5", "3/25"],
                0,
                "Same bottom number: subtract the tops.",
            )?,
            question(
                "What is 1/2 of 10?",
                &["2", "5", "20", "12"],
                1,
                "Half of ten is five.",
            )?,
        ],
    );

    Course::new(
        CourseId::new("fractions"),
        "fractions",
        "Fraction Kingdom",
        "Share pizzas and cross bridges with fractions.",
        vec![bakery, market],
    )
}

fn space() -> Result<Course, CourseError> {
    let launch = Chapter::new(
        "Countdown to Launch",
        story(&[
            "Mission control needs a navigator who knows the solar system.",
            "Pass the checks to board the rocket.",
        ]),
        vec![
            question(
                "Which planet is closest to the Sun?",
                &["Venus", "Mercury", "Earth", "Mars"],
                1,
                "Mercury orbits closest to the Sun.",
            )?,
            question(
                "What do we call a rock that falls from space and lands on Earth?",
                &["Comet", "Meteorite", "Asteroid belt", "Nebula"],
                1,
                "Once it reaches the ground it is a meteorite.",
            )?,
            question(
                "Which planet is known as the Red Planet?",
                &["Jupiter", "Mars", "Saturn"],
                1,
                "Iron oxide dust makes Mars look red.",
            )?,
        ],
    );

    let orbit = Chapter::new(
        "Into Orbit",
        story(&[
            "The rocket is in orbit and the crew is checking the star charts.",
            "One wrong reading and the ship drifts off course.",
        ]),
        vec![
            question(
                "What is the largest planet in our solar system?",
                &["Saturn", "Neptune", "Jupiter", "Earth"],
                2,
                "Jupiter is more than eleven times wider than Earth.",
            )?,
            question(
                "What keeps the Moon in orbit around Earth?",
                &["Magnetism", "Gravity", "Wind", "Sunlight"],
                1,
                "Earth's gravity pulls on the Moon.",
            )?,
            question(
                "How long does Earth take to orbit the Sun?",
                &["One day", "One month", "One year"],
                2,
                "One trip around the Sun takes about 365 days.",
            )?,
        ],
    );

    Course::new(
        CourseId::new("space"),
        "space",
        "Space Explorers",
        "Navigate the solar system one question at a time.",
        vec![launch, orbit],
    )
}

/// # Errors
///
/// Returns `CourseError` if a bundled question is malformed.
pub fn builtin_catalog() -> Result<Catalog, CourseError> {
    Ok(Catalog::new(vec![fractions()?, space()?]))
}
