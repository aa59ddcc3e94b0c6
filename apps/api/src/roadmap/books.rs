//! Recommended books per skill and level. Skills without an entry get none.

use serde::Serialize;

use crate::assessment::level::ProficiencyLevel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub url: String,
}

type Shelf = &'static [(&'static str, &'static str, &'static str)];

/// (skill, [beginner, intermediate, advanced]); each book is (title, author, url).
const BOOKS: &[(&str, [Shelf; 3])] = &[
    (
        "python",
        [
            &[
                ("Python Crash Course", "Eric Matthes", "https://nostarch.com/pythoncrashcourse2e"),
                (
                    "Automate the Boring Stuff with Python",
                    "Al Sweigart",
                    "https://automatetheboringstuff.com/",
                ),
            ],
            &[
                (
                    "Fluent Python",
                    "Luciano Ramalho",
                    "https://www.oreilly.com/library/view/fluent-python-2nd/9781492056348/",
                ),
                (
                    "Python Cookbook",
                    "David Beazley & Brian K. Jones",
                    "https://www.oreilly.com/library/view/python-cookbook-3rd/9781449357337/",
                ),
            ],
            &[
                ("Effective Python", "Brett Slatkin", "https://effectivepython.com/"),
                (
                    "High Performance Python",
                    "Micha Gorelick & Ian Ozsvald",
                    "https://www.oreilly.com/library/view/high-performance-python/9781492055013/",
                ),
            ],
        ],
    ),
    (
        "javascript",
        [
            &[
                ("Eloquent JavaScript", "Marijn Haverbeke", "https://eloquentjavascript.net/"),
                (
                    "JavaScript: The Good Parts",
                    "Douglas Crockford",
                    "https://www.oreilly.com/library/view/javascript-the-good/9780596517748/",
                ),
            ],
            &[
                (
                    "You Don't Know JS",
                    "Kyle Simpson",
                    "https://github.com/getify/You-Dont-Know-JS",
                ),
                (
                    "JavaScript Patterns",
                    "Stoyan Stefanov",
                    "https://www.oreilly.com/library/view/javascript-patterns/9781449399115/",
                ),
            ],
            &[
                (
                    "Secrets of the JavaScript Ninja",
                    "John Resig & Bear Bibeault",
                    "https://www.manning.com/books/secrets-of-the-javascript-ninja-second-edition",
                ),
                (
                    "Functional-Light JavaScript",
                    "Kyle Simpson",
                    "https://github.com/getify/Functional-Light-JS",
                ),
            ],
        ],
    ),
    (
        "react",
        [
            &[
                ("React Explained", "Zac Gordon", "https://www.ostraining.com/books/react/"),
                (
                    "Learning React",
                    "Alex Banks & Eve Porcello",
                    "https://www.oreilly.com/library/view/learning-react-2nd/9781492051718/",
                ),
            ],
            &[
                (
                    "React Design Patterns and Best Practices",
                    "Michele Bertoli",
                    "https://www.packtpub.com/product/react-design-patterns-and-best-practices-second-edition/9781800560444",
                ),
                (
                    "Pro React 16",
                    "Adam Freeman",
                    "https://www.apress.com/gp/book/9781484244500",
                ),
            ],
            &[
                (
                    "React Cookbook",
                    "David Griffiths & Dawn Griffiths",
                    "https://www.oreilly.com/library/view/react-cookbook/9781492085836/",
                ),
                (
                    "Testing React Applications",
                    "Jeff Valore",
                    "https://www.manning.com/books/testing-react-applications",
                ),
            ],
        ],
    ),
    (
        "machine learning",
        [
            &[
                (
                    "Hands-On Machine Learning with Scikit-Learn, Keras, and TensorFlow",
                    "Aurélien Géron",
                    "https://www.oreilly.com/library/view/hands-on-machine-learning/9781492032632/",
                ),
                (
                    "Python Machine Learning",
                    "Sebastian Raschka & Vahid Mirjalili",
                    "https://www.packtpub.com/product/python-machine-learning-third-edition/9781789955750",
                ),
            ],
            &[
                (
                    "Pattern Recognition and Machine Learning",
                    "Christopher Bishop",
                    "https://www.microsoft.com/en-us/research/people/cmbishop/prml-book/",
                ),
                (
                    "Deep Learning",
                    "Ian Goodfellow, Yoshua Bengio & Aaron Courville",
                    "https://www.deeplearningbook.org/",
                ),
            ],
            &[
                (
                    "Reinforcement Learning: An Introduction",
                    "Richard S. Sutton & Andrew G. Barto",
                    "http://incompleteideas.net/book/the-book-2nd.html",
                ),
                (
                    "Machine Learning: A Probabilistic Perspective",
                    "Kevin P. Murphy",
                    "https://mitpress.mit.edu/books/machine-learning-1",
                ),
            ],
        ],
    ),
];

pub fn recommended_books(skill: &str, level: ProficiencyLevel) -> Vec<Book> {
    let key = skill.trim().to_lowercase();
    let Some((_, shelves)) = BOOKS.iter().find(|(name, _)| *name == key) else {
        return Vec::new();
    };

    let shelf = match level {
        ProficiencyLevel::Beginner => shelves[0],
        ProficiencyLevel::Intermediate => shelves[1],
        ProficiencyLevel::Advanced => shelves[2],
    };

    shelf
        .iter()
        .map(|(title, author, url)| Book {
            title: title.to_string(),
            author: author.to_string(),
            url: url.to_string(),
        })
        .collect()
}
