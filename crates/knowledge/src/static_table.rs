//! Compiled-in answers for the questions asked most often.
//!
//! A query is matched against an ordered decision list: the first rule whose
//! predicate holds wins. Predicates overlap ("librarian" alone vs. "librarian"
//! plus "subject"), so the order below is part of the behavior.

use serde::Serialize;

/// One canned answer.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct KnowledgeEntry {
    pub topic: &'static str,
    pub answer: &'static str,
}

pub static HOURS: KnowledgeEntry = KnowledgeEntry {
    topic: "hours",
    answer: r#"
SCHURZ LIBRARY HOURS:
- Monday - Thursday: 8am - 10pm
- Friday: 9am - 6pm
- Saturday: 10am - 2pm
- Sunday: 2pm - 10pm

WERC (Wiekamp Educational Resource Commons) HOURS:
- Monday - Thursday: 8am - 8pm
- Friday: 8am - 5pm
- Saturday - Sunday: Closed

For real-time hours and holiday closures, visit: https://library.iusb.edu/about-us/hdp.html
"#,
};

pub static ROOM_RESERVATION: KnowledgeEntry = KnowledgeEntry {
    topic: "room_reservation",
    answer: r#"
TO RESERVE A STUDY ROOM:
1. Visit: https://library.iusb.edu/use-library/room-reservation.html
2. Group study rooms and conference rooms are available for reservation
3. Rooms can be booked online through the library's reservation system
4. Valid IU South Bend ID required

Contact: Schurz Library Front Desk at 574-520-4440
"#,
};

pub static BORROWING: KnowledgeEntry = KnowledgeEntry {
    topic: "borrowing",
    answer: r#"
HOW TO BORROW BOOKS:
1. You must have a valid IU library card
2. Bring photo ID when checking out
3. Check out at the circulation desk (east side of library foyer) or WERC service desk

LOAN PERIODS:
- Regular books: 16 weeks (can renew up to 10 times)
- Reserve items: 2-4 hours (set by instructor)
- Media items: Limited renewal

RENEWALS:
- In person at circulation desk
- By phone: 574-520-4440
- Online via IUCAT: https://iucat.iu.edu (My Account)

RETURNS:
- Book drops at WERC, Schurz Library, or Hildreth Circle (24-hour)
- Circulation desks during operating hours
"#,
};

pub static PRINTING: KnowledgeEntry = KnowledgeEntry {
    topic: "printing",
    answer: r#"
PRINTING SERVICES:

SCHURZ LIBRARY:
- Black/white laser printers on floors 1, 3, and 4
- Color laser printer on 1st floor (Hammes Information Commons)
- Single and double-sided printing available

WERC:
- Color and black/white laser printers
- Sizes: 8.5"x11" and 11"x17"
- Wide format printing up to 44" wide
- 3D printing available

SCANNING:
- Free scanners in Hammes Information Commons
- WERC has 5 scanners (4 SNAP + 1 flatbed up to 12"x17.5")

For printing costs and allotments, visit: https://library.iusb.edu/use-library/pcs/index.html
"#,
};

pub static SUBJECT_LIBRARIANS: KnowledgeEntry = KnowledgeEntry {
    topic: "subject_librarians",
    answer: r#"
SUBJECT LIBRARIANS AT IU SOUTH BEND:

KIRBY CHENG - Computer Science, Dental Hygiene, Informatics, Mathematical Sciences, New Media, World Languages
Contact: https://libcal.iusb.edu/appointments/kirbycheng

JULIE FEIGHERY - Biology, Criminal Justice, Dance, English, Film Studies, Honors, Liberal Studies, Theatre, Women & Gender Studies
Contact: https://libcal.iusb.edu/appointments/juliefeighery

SCOTT OPASIK - American Studies, Astronomy, Chemistry, Counseling, Education, History, Music, Philosophy, Physics, Political Science, Public Affairs, Religion, Sustainability
Contact: https://libcal.iusb.edu/appointments/scottopasik

SUSAN THOMAS - African American Studies, Health Sciences, Nursing, Psychology
Contact: https://libcal.iusb.edu/appointments/susanthomas

ERICA GUEVARA - Clinical Sciences, Communication Studies, Medical Imaging, Occupational Therapy, Speech-Language Pathology
Contact: https://libcal.iusb.edu/appointments/ericaguevara

STEVE SIGETY - Anthropology, Fine Arts, Sociology, Social Work
Contact: https://libcal.iusb.edu/appointments/stevesigety

Schedule appointments: https://library.iusb.edu/research-support/subject-librarians.html
"#,
};

pub static LIBRARIAN_COMPUTING: KnowledgeEntry = KnowledgeEntry {
    topic: "librarian_computing",
    answer: "The subject librarian for Computer Science, Informatics, and Mathematical Sciences is KIRBY CHENG.\nSchedule an appointment: https://libcal.iusb.edu/appointments/kirbycheng",
};

pub static LIBRARIAN_HEALTH: KnowledgeEntry = KnowledgeEntry {
    topic: "librarian_health",
    answer: "The subject librarian for Health Sciences, Nursing, and Psychology is SUSAN THOMAS.\nSchedule an appointment: https://libcal.iusb.edu/appointments/susanthomas",
};

pub static LIBRARIAN_EDUCATION: KnowledgeEntry = KnowledgeEntry {
    topic: "librarian_education",
    answer: "The subject librarian for Education is SCOTT OPASIK.\nSchedule an appointment: https://libcal.iusb.edu/appointments/scottopasik",
};

pub static RESERVES: KnowledgeEntry = KnowledgeEntry {
    topic: "reserves",
    answer: r#"
COURSE RESERVES:

Reserve materials are kept behind the circulation desk at Schurz Library.

TO ACCESS RESERVES:
1. Request from circulation staff (not self-service)
2. Valid IU library card + photo ID required
3. Search reserves in IUCAT: https://iucat.iu.edu/reserves

BORROWING RULES:
- ONE reserve item per person at a time
- Loan periods: 2-4 hours or in-house only (set by instructor)
- Cannot be renewed or placed on hold
- Must return to same circulation desk

FOR FACULTY - To place items on reserve:
- Submit Course Reserve Request Form
- Library items or personal copies accepted
- Copyright compliance is instructor's responsibility

Contact: Maureen Kennedy (maurkenn@iu.edu) or Julie Feighery (jmfelli@iu.edu)
"#,
};

pub static WERC_SERVICES: KnowledgeEntry = KnowledgeEntry {
    topic: "werc_services",
    answer: r#"
WERC (WIEKAMP EDUCATIONAL RESOURCE COMMONS) SERVICES:

EQUIPMENT AVAILABLE:
- Laminator (17" wide roller) for posters and signs
- Die cuts (500+ letter and shape options)
- Comb binder, ProClick binder, Coil binder
- Button maker, Cricut machine, Heat press for t-shirts

PRINTING:
- Color laser printer (8x11 or 11x17)
- Wide format printing up to 44" wide
- 3D printing available

POLICIES:
- Staff assistance at front desk (no equipment usage fees)
- Only check or cash for supply charges
- Projects may take 2-3 days or longer

Location: Education & Arts Building, Room 2010
Contact: Ryan Weber - ryweber@iu.edu, 574-520-5543
"#,
};

pub static ADMISSIONS: KnowledgeEntry = KnowledgeEntry {
    topic: "admissions",
    answer: r#"
ADMISSION REQUIREMENTS:

FIRST-YEAR STUDENTS:
- High school diploma or equivalent
- IU South Bend is test-optional (SAT/ACT not required)
- Apply at: https://admissions.iusb.edu/apply/first-year.html

TRANSFER STUDENTS:
- Previous college transcripts required
- Apply at: https://admissions.iusb.edu/apply/transfer/index.html

GRADUATE STUDENTS:
- Bachelor's degree required
- Requirements vary by program
- Apply at: https://admissions.iusb.edu/apply/graduate.html

INTERNATIONAL STUDENTS:
- Additional documentation required (visa, financial support)
- Apply through: https://admissions.iusb.edu/oiss/admissions/index.html

Contact Admissions: 574-520-4839
Visit: https://admissions.iusb.edu/
"#,
};

pub static TUITION: KnowledgeEntry = KnowledgeEntry {
    topic: "tuition",
    answer: r#"
TUITION & COSTS:

IU South Bend uses a flat-fee tuition model:
- Pay one flat fee for 12-18 credit hours per semester
- Most classes are 3 credit hours
- Most programs require ~15.5 credits/semester to graduate in 8 semesters

For current tuition rates, visit:
https://administration.iusb.edu/bursar/index.html

FINANCIAL AID:
- FAFSA required for federal aid
- Scholarships available
- Apply at: https://www.iusb.edu/students/financial-aid/index.html

Contact Bursar: https://administration.iusb.edu/bursar/billing-and-payment/index.html
"#,
};

pub static PARKING: KnowledgeEntry = KnowledgeEntry {
    topic: "parking",
    answer: r#"
PARKING INFORMATION:

Parking permits required for all campus lots.

For parking permits, regulations, and maps:
https://administration.iusb.edu/parking-services/index.html

Campus Police (for parking issues): 574-520-4239
"#,
};

pub static MAPS: KnowledgeEntry = KnowledgeEntry {
    topic: "maps",
    answer: r#"
CAMPUS MAPS:

Interactive campus map and building locations:
https://www.iusb.edu/about/maps/index.html

Main buildings:
- Schurz Library
- Administration Building
- Education & Arts Building (WERC location)
- Northside Hall (Computer Science)
- Wiekamp Hall
"#,
};

pub static CONTACT: KnowledgeEntry = KnowledgeEntry {
    topic: "contact",
    answer: r#"
IU SOUTH BEND CONTACT INFORMATION:

Main Campus: 1700 Mishawaka Ave, South Bend, IN 46615

ADMISSIONS: 574-520-4839
REGISTRAR: 574-520-4453
FINANCIAL AID: 574-520-4357
LIBRARY: 574-520-4440
CAMPUS POLICE: 574-520-4239

Website: https://www.iusb.edu/
Contact page: https://www.iusb.edu/about/contact-us.html
"#,
};

pub static CS_DEPARTMENT: KnowledgeEntry = KnowledgeEntry {
    topic: "cs_department",
    answer: r#"
COMPUTER SCIENCE & INFORMATICS DEPARTMENT:

DEPARTMENT CHAIR: Dr. Dana Vrajitoru, D.Sci.
Email: dvrajito@iusb.edu
Office: Northside Hall, Room 337

DIRECTOR OF INFORMATICS: Dr. Hossein Hakimzadeh, Ph.D.

PROGRAMS OFFERED:
- Computer Science (B.S.)
- Informatics (B.S.)
- Applied Mathematics and Computer Science

SUBJECT LIBRARIAN: Kirby Cheng
Appointment: https://libcal.iusb.edu/appointments/kirbycheng

Website: https://clas.iusb.edu/computer-science-informatics/index.html
Faculty: https://clas.iusb.edu/computer-science-informatics/people/faculty-staff.html
"#,
};

/// Every entry, for listing and lookup by topic.
pub static ENTRIES: &[&KnowledgeEntry] = &[
    &HOURS,
    &ROOM_RESERVATION,
    &BORROWING,
    &PRINTING,
    &SUBJECT_LIBRARIANS,
    &LIBRARIAN_COMPUTING,
    &LIBRARIAN_HEALTH,
    &LIBRARIAN_EDUCATION,
    &RESERVES,
    &WERC_SERVICES,
    &ADMISSIONS,
    &TUITION,
    &PARKING,
    &MAPS,
    &CONTACT,
    &CS_DEPARTMENT,
];

/// One step of the decision list. `matches` sees the lowercased query.
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub entry: &'static KnowledgeEntry,
}

fn any(query: &str, words: &[&str]) -> bool {
    words.iter().any(|w| query.contains(w))
}

/// The decision list, highest priority first.
pub static RULES: &[Rule] = &[
    Rule {
        name: "library_hours",
        matches: |q| any(q, &["hour", "open", "close", "when"]) && any(q, &["library", "schurz"]),
        entry: &HOURS,
    },
    Rule {
        name: "room_reservation",
        matches: |q| {
            any(q, &["room", "study room", "reserve", "reservation", "book a room"])
                && any(q, &["study", "room", "conference"])
        },
        entry: &ROOM_RESERVATION,
    },
    Rule {
        name: "borrowing",
        matches: |q| {
            any(q, &["borrow", "checkout", "check out", "loan", "renew"])
                && any(q, &["book", "library"])
        },
        entry: &BORROWING,
    },
    Rule {
        name: "printing",
        matches: |q| any(q, &["print", "printing", "printer", "scan", "scanner", "3d print"]),
        entry: &PRINTING,
    },
    Rule {
        name: "subject_librarians",
        matches: |q| q.contains("librarian") && any(q, &["subject", "who"]),
        entry: &SUBJECT_LIBRARIANS,
    },
    Rule {
        name: "librarian_computing",
        matches: |q| q.contains("librarian") && any(q, &["computer", "math", "informatics"]),
        entry: &LIBRARIAN_COMPUTING,
    },
    Rule {
        name: "librarian_health",
        matches: |q| q.contains("librarian") && any(q, &["nursing", "health", "psychology"]),
        entry: &LIBRARIAN_HEALTH,
    },
    Rule {
        name: "librarian_education",
        matches: |q| q.contains("librarian") && any(q, &["business", "education"]),
        entry: &LIBRARIAN_EDUCATION,
    },
    Rule {
        name: "course_reserves",
        matches: |q| q.contains("reserve") && any(q, &["course", "class", "textbook"]),
        entry: &RESERVES,
    },
    Rule {
        name: "werc_services",
        matches: |q| {
            any(q, &["werc", "laminator", "die cut"]) || (q.contains("button") && q.contains("make"))
        },
        entry: &WERC_SERVICES,
    },
    Rule {
        name: "admissions",
        matches: |q| any(q, &["admission", "apply", "application", "requirement", "enroll"]),
        entry: &ADMISSIONS,
    },
    Rule {
        name: "tuition",
        matches: |q| {
            any(
                q,
                &["tuition", "cost", "fee", "price", "how much", "financial aid", "fafsa"],
            )
        },
        entry: &TUITION,
    },
    Rule {
        name: "parking",
        matches: |q| any(q, &["parking", "park"]),
        entry: &PARKING,
    },
    Rule {
        name: "campus_map",
        matches: |q| q.contains("map") || (q.contains("where") && q.contains("building")),
        entry: &MAPS,
    },
    Rule {
        name: "contact",
        matches: |q| any(q, &["contact", "phone", "call", "address"]),
        entry: &CONTACT,
    },
    Rule {
        name: "cs_chair_by_name",
        matches: |q| any(q, &["dana", "vrajitoru"]),
        entry: &CS_DEPARTMENT,
    },
    Rule {
        name: "cs_department",
        matches: |q| q.contains("computer science") && any(q, &["chair", "department", "head"]),
        entry: &CS_DEPARTMENT,
    },
];

/// Match `query` against the decision list. `None` means "fall back to live
/// retrieval".
pub fn classify(query: &str) -> Option<&'static KnowledgeEntry> {
    let query = query.to_lowercase();
    let rule = RULES.iter().find(|rule| (rule.matches)(&query))?;
    tracing::debug!(rule = rule.name, topic = rule.entry.topic, "Static answer matched");
    Some(rule.entry)
}

/// The answer text for `query`, if a rule matches.
pub fn static_answer(query: &str) -> Option<&'static str> {
    classify(query).map(|entry| entry.answer)
}

/// Look an entry up by its topic key.
pub fn entry(topic: &str) -> Option<&'static KnowledgeEntry> {
    ENTRIES.iter().copied().find(|e| e.topic == topic)
}
