use crate::models::{ResponsibilityTask, TaskCategory};

/// Points for each completed responsibility.
pub const TASK_POINTS: u32 = 10;

macro_rules! tasks {
    ($( $id:literal, $cat:ident, $title:literal, $icon:literal; )*) => {
        &[ $( ResponsibilityTask {
            id: $id,
            category: TaskCategory::$cat,
            title: $title,
            icon: $icon,
        }, )* ]
    };
}

pub static TASKS: &[ResponsibilityTask] = tasks! {
    1, Home, "Tidy my wardrobe and drawers", "👕";
    2, Home, "Make my bed", "🛏️";
    3, Home, "Put my shoes away neatly", "👟";
    4, Home, "Hang my clothes in the wardrobe", "👔";
    5, Home, "Help set the table", "🍽️";
    6, Home, "Help clear the table", "🧹";
    7, Home, "Wash my hands before and after meals", "🧼";
    8, Home, "Take my own plate to the kitchen", "🍴";
    9, Home, "Put rubbish in the bin", "🗑️";
    10, Home, "Water the flowers", "🌻";
    11, Home, "Help fold the laundry", "👚";
    12, Home, "Tidy my bookshelf", "📚";
    13, Home, "Clean the sink and toilet", "🚽";
    14, Home, "Help tidy the fridge", "🧊";
    15, Home, "Load the dishwasher", "🍽️";
    16, Home, "Dust my room", "🧽";
    17, Home, "Say the mealtime dua", "🤲";
    18, Home, "Help my family vacuum the house", "🧹";
    19, Home, "Feed the pet, if we have one", "🐾";
    20, Home, "Have a family film or reading hour", "📖";
    21, Personal, "Brush my teeth", "🪥";
    22, Personal, "Keep my clothes clean", "👕";
    23, Personal, "Wash my hands", "🧼";
    24, Personal, "Go to bed on time", "😴";
    25, Personal, "Wake up on time", "⏰";
    26, Personal, "Pack my school bag", "🎒";
    27, Personal, "Do my homework on time", "📝";
    28, Personal, "Keep track of my belongings", "🔑";
    29, Personal, "Not waste water", "💧";
    30, Personal, "Switch off unneeded lights", "💡";
    31, Personal, "Pick up litter I see on the floor", "🗑️";
    32, Personal, "Cut my nails", "✂️";
    33, Personal, "Limit phone and tablet time", "📱";
    34, Personal, "Take care to eat healthily", "🥗";
    35, Personal, "Comb my own hair", "💇";
    36, Personal, "Start the day with a dua", "🤲";
    37, Personal, "Give thanks at the end of the day", "🙏";
    38, Personal, "Speak truthfully", "💬";
    39, Personal, "Be patient", "⏳";
    40, Personal, "Remember Allah in daily life", "☪️";
    41, Family, "Read a book to my sibling", "📖";
    42, Family, "Serve tea to my elders", "☕";
    43, Family, "Help my mother in the kitchen", "👩‍🍳";
    44, Family, "Carry the shopping bags for my father", "🛍️";
    45, Family, "Say good morning and give salaam", "👋";
    46, Family, "Give salaam when sitting down to eat", "🍽️";
    47, Family, "Hug and thank my elders", "🤗";
    48, Family, "Visit my relatives", "🏠";
    49, Family, "Call my grandparents", "📞";
    50, Family, "Teach my sibling a game", "🎮";
    51, Social, "Take part in helping activities", "🤝";
    52, Social, "Get along with my deskmate", "👫";
    53, Social, "Arrive at and leave lessons on time", "⏰";
    54, Social, "Put rubbish in the bin", "🗑️";
    55, Social, "Give salaam when entering class", "👋";
    56, Social, "Greet the school staff", "🙋";
    57, Social, "Greet the neighbours", "👋";
    58, Social, "Congratulate someone on their birthday", "🎂";
    59, Social, "Say kind words to my friends", "💬";
    60, Social, "Thank my teachers", "👨‍🏫";
    61, Social, "Look after school property", "✏️";
    62, Devotion, "Make dua morning and evening", "🤲";
    63, Devotion, "Say Alhamdulillah", "🙏";
    64, Devotion, "Pray Zuhr in congregation", "🕌";
    65, Devotion, "Memorise a surah from the Quran", "📖";
    66, Devotion, "Thank Allah", "🙏";
    67, Devotion, "Not harm anyone", "❤️";
    68, Devotion, "Seek Allah's pleasure by helping others", "🤝";
    69, Devotion, "Ask Allah for forgiveness", "🤲";
    70, Devotion, "Keep the Friday sunnahs", "🕌";
    71, Devotion, "Set an example through kindness", "⭐";
};

pub fn find(id: u32) -> Option<&'static ResponsibilityTask> {
    TASKS.iter().find(|t| t.id == id)
}

pub fn by_category(category: TaskCategory) -> impl Iterator<Item = &'static ResponsibilityTask> {
    TASKS.iter().filter(move |t| t.category == category)
}
