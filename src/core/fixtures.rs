//! # Demo Fixtures
//!
//! Every screen reads its data from here. Builders return fresh owned values
//! so each screen starts from pristine data on every launch.

use chrono::{Duration, Local};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::core::model::{
    AttachmentKind, Category, ChatMessage, Conversation, Formation, Lesson, Level, MessageKind,
    Post, Product, ProductKind, Profile, ProfileStat, Student, Video, VideoKind,
};

/// Fixed text of the simulated counterpart reply.
pub const TEACHER_REPLY: &str = "Excellente réponse ! Votre compréhension est correcte. \
    Vous pouvez passer au prochain exercice.";

/// Exercise unlocked after a teacher validates a submission.
pub const NEXT_EXERCISE: &str =
    "Exercice 2: Ajoutez un état local à votre composant avec useState";

/// Authors the simulated reply is attributed to.
pub const REPLY_AUTHORS: [&str; 3] = ["Prof. Martin", "Dr. Sophie", "Clara Design"];

pub const EMOJIS: [&str; 70] = [
    "😀", "😃", "😄", "😁", "😆", "😅", "😂", "🤣", "🥲", "😊",
    "😉", "😌", "😍", "🥰", "😘", "😗", "😙", "😚", "😋", "😛",
    "😝", "😜", "🤪", "🤨", "🧐", "🤓", "😎", "🥸", "🤩", "🥳",
    "😏", "😒", "😞", "😔", "😟", "😕", "🙁", "☹️", "😣", "😖",
    "👍", "👎", "👌", "✌️", "🤞", "🤟", "🤘", "🤙", "👈", "👉",
    "🔥", "💯", "💪", "👏", "🙌", "👐", "🤲", "🤝", "🙏", "✍️",
    "❤️", "🧡", "💛", "💚", "💙", "💜", "🖤", "🤍", "🤎", "💔",
];

pub fn pick_reply_author<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    REPLY_AUTHORS.choose(rng).copied().unwrap_or(REPLY_AUTHORS[0])
}

fn lesson(id: u32, title: &str, completed: bool, duration: &str) -> Lesson {
    Lesson {
        id,
        title: title.to_string(),
        completed,
        duration: duration.to_string(),
    }
}

pub fn formations() -> Vec<Formation> {
    vec![
        Formation {
            id: 1,
            title: "Formation React Complete".to_string(),
            author: "Prof. Martin".to_string(),
            progress: 65,
            students: 324,
            rating: 4.8,
            is_teacher: false,
            levels: vec![
                Level {
                    id: 1,
                    name: "Niveau Débutant".to_string(),
                    description: "Bases de React".to_string(),
                    last_message: "Excellente réponse ! Continuez comme ça.".to_string(),
                    timestamp: "14:32".to_string(),
                    unread: 2,
                    lessons: vec![
                        lesson(1, "Introduction à React", true, "15 min"),
                        lesson(2, "Composants et Props", true, "20 min"),
                        lesson(3, "État et Hooks", false, "25 min"),
                    ],
                },
                Level {
                    id: 2,
                    name: "Niveau Intermédiaire".to_string(),
                    description: "Concepts avancés".to_string(),
                    last_message: "Nouvelle leçon disponible".to_string(),
                    timestamp: "Hier".to_string(),
                    unread: 0,
                    lessons: vec![
                        lesson(4, "Context API", false, "30 min"),
                        lesson(5, "Gestion d'état", false, "35 min"),
                    ],
                },
            ],
        },
        Formation {
            id: 2,
            title: "Design Thinking Workshop".to_string(),
            author: "Clara Design".to_string(),
            progress: 30,
            students: 156,
            rating: 4.9,
            is_teacher: true,
            levels: vec![Level {
                id: 3,
                name: "Introduction".to_string(),
                description: "Bases du Design Thinking".to_string(),
                last_message: "Exercice envoyé en vidéo".to_string(),
                timestamp: "12:15".to_string(),
                unread: 1,
                lessons: vec![
                    lesson(6, "Qu'est-ce que le Design Thinking ?", true, "12 min"),
                    lesson(7, "Les 5 étapes", false, "18 min"),
                ],
            }],
        },
    ]
}

pub fn students() -> Vec<Student> {
    let student = |id, name: &str, avatar: &str, last: &str, ts: &str, unread, progress| Student {
        id,
        name: name.to_string(),
        avatar: avatar.to_string(),
        last_message: last.to_string(),
        timestamp: ts.to_string(),
        unread,
        progress,
    };
    vec![
        student(1, "Marie Dupont", "👩‍🎓", "J'ai terminé l'exercice 1, voici ma photo", "14:32", 2, 45),
        student(2, "Jean Martin", "👨‍🎓", "Pouvez-vous m'expliquer cette partie ?", "13:45", 1, 30),
        student(3, "Sarah Ahmed", "👩‍💼", "Exercice envoyé en vidéo", "Hier", 0, 60),
    ]
}

pub fn products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Formation React Complete".to_string(),
            category: Category::Formations,
            price: 299,
            original_price: Some(399),
            rating: 4.8,
            reviews: 324,
            author: "Prof. Martin".to_string(),
            description: "Maîtrisez React de A à Z avec cette formation complète".to_string(),
            kind: ProductKind::Formation,
        },
        Product {
            id: 2,
            name: "Guide Mathématiques Appliquées".to_string(),
            category: Category::Livres,
            price: 45,
            original_price: None,
            rating: 4.6,
            reviews: 156,
            author: "Dr. Sophie".to_string(),
            description: "Livre de référence pour les mathématiques appliquées".to_string(),
            kind: ProductKind::Product,
        },
        Product {
            id: 3,
            name: "Coaching Personnel 1h".to_string(),
            category: Category::Services,
            price: 80,
            original_price: None,
            rating: 4.9,
            reviews: 89,
            author: "Clara Coach".to_string(),
            description: "Session de coaching personnalisé pour votre développement".to_string(),
            kind: ProductKind::Service,
        },
        Product {
            id: 4,
            name: "Formation Design Thinking".to_string(),
            category: Category::Formations,
            price: 199,
            original_price: Some(249),
            rating: 4.7,
            reviews: 212,
            author: "Design Academy".to_string(),
            description: "Apprenez les méthodes du Design Thinking".to_string(),
            kind: ProductKind::Formation,
        },
    ]
}

pub fn videos() -> Vec<Video> {
    let video = |id, title: &str, author: &str, duration: &str, kind, likes, comments| Video {
        id,
        title: title.to_string(),
        author: author.to_string(),
        duration: duration.to_string(),
        kind,
        likes,
        comments,
    };
    vec![
        video(1, "Formation React Avancé", "Prof. Martin", "2:34", VideoKind::Promo, 245, 18),
        video(2, "Mathématiques Appliquées", "Dr. Sophie", "1:58", VideoKind::Educational, 189, 12),
        video(3, "Design Thinking Workshop", "Clara Design", "3:12", VideoKind::Promo, 367, 24),
    ]
}

pub fn posts() -> Vec<Post> {
    vec![
        Post {
            id: 1,
            author: "Prof. Martin".to_string(),
            content: "Nouvelle méthodologie d'apprentissage révolutionnaire ! 🎯".to_string(),
            has_image: true,
            likes: 45,
            comments: 8,
        },
        Post {
            id: 2,
            author: "Dr. Sophie".to_string(),
            content: "Les secrets des mathématiques quantiques expliqués simplement".to_string(),
            has_image: false,
            likes: 67,
            comments: 15,
        },
    ]
}

pub fn conversations() -> Vec<Conversation> {
    let conv = |id, name: &str, last: &str, ts: &str, unread, avatar, online| Conversation {
        id,
        name: name.to_string(),
        last_message: last.to_string(),
        timestamp: ts.to_string(),
        unread,
        avatar,
        online,
    };
    vec![
        conv(1, "Prof. Martin", "Excellente réponse ! Continuez comme ça.", "14:32", 2, 'M', true),
        conv(2, "Formation React - Groupe", "Nouvelle leçon disponible", "12:15", 0, 'R', false),
        conv(3, "Dr. Sophie", "Rappel: exercice à rendre demain", "Hier", 1, 'S', false),
    ]
}

pub fn profile() -> Profile {
    let stat = |label: &str, value| ProfileStat {
        label: label.to_string(),
        value,
    };
    Profile {
        initials: "JD".to_string(),
        name: "John Doe".to_string(),
        email: "john.doe@email.com".to_string(),
        member_since: "Étudiant actif depuis mars 2024".to_string(),
        stats: vec![
            stat("Formations complétées", 3),
            stat("Heures d'apprentissage", 47),
            stat("Exercices validés", 28),
            stat("Badges obtenus", 5),
        ],
        progress: vec![
            ("Formation React".to_string(), 65),
            ("Design Thinking".to_string(), 30),
        ],
        menu: [
            "Paramètres",
            "Mes formations",
            "Badges et récompenses",
            "Notifications",
            "Aide et support",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    }
}

/// Opening messages of a chat. `first_id` is the id given to the first seed;
/// the rest follow sequentially.
pub fn seed_messages(teacher_view: bool, student_name: Option<&str>, first_id: u64) -> Vec<ChatMessage> {
    let now = Local::now();
    if !teacher_view {
        return vec![
            ChatMessage::new(
                first_id,
                MessageKind::System,
                "Bienvenue dans cette leçon ! Regardez d'abord la vidéo ci-dessus.",
            )
            .with_timestamp(now - Duration::minutes(5)),
            ChatMessage::new(
                first_id + 1,
                MessageKind::Exercise,
                "Exercice 1: Créez votre premier composant React",
            )
            .with_attachment(AttachmentKind::Image, "exercice-1.png")
            .with_timestamp(now - Duration::minutes(3)),
        ];
    }

    let student = student_name.unwrap_or("l'élève");
    vec![
        ChatMessage::new(
            first_id,
            MessageKind::System,
            format!("Suivi de {student} : validez ou refusez les exercices envoyés."),
        )
        .with_timestamp(now - Duration::minutes(30)),
        ChatMessage::new(
            first_id + 1,
            MessageKind::Exercise,
            "Exercice 1: Créez votre premier composant React",
        )
        .with_attachment(AttachmentKind::Image, "exercice-1.png")
        .with_timestamp(now - Duration::minutes(25)),
        ChatMessage::new(
            first_id + 2,
            MessageKind::User,
            "J'ai terminé l'exercice 1, voici ma photo",
        )
        .with_attachment(AttachmentKind::Image, "exercice-1-reponse.jpg")
        .with_author(student)
        .with_timestamp(now - Duration::minutes(10))
        .validatable(),
    ]
}
