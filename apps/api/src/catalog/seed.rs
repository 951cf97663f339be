//! Built-in demo catalog. Deadlines are offsets from process start so the
//! urgency rules have something to show.

use chrono::{DateTime, Duration, Utc};

use crate::models::opportunity::{ApplicationStatus, Opportunity};

struct SeedEntry {
    id: &'static str,
    company: &'static str,
    role: &'static str,
    cohort: &'static str,
    location: &'static str,
    salary: &'static str,
    deadline_minutes: i64,
    status: ApplicationStatus,
    description: &'static str,
    requirements: &'static [&'static str],
    company_type: &'static str,
    industry: &'static str,
}

const SEED: &[SeedEntry] = &[
    SeedEntry {
        id: "1",
        company: "Google",
        role: "Software Engineer Intern",
        cohort: "SDE",
        location: "Bangalore",
        salary: "1.2L/month",
        deadline_minutes: 90,
        status: ApplicationStatus::Applied,
        description: "Join Google's engineering team and work on products used by billions.",
        requirements: &["DSA", "System Design", "Python/Java", "CGPA > 8.0"],
        company_type: "MNC",
        industry: "Technology",
    },
    SeedEntry {
        id: "2",
        company: "Microsoft",
        role: "SDE Intern",
        cohort: "SDE",
        location: "Hyderabad",
        salary: "1.0L/month",
        deadline_minutes: 6 * 60,
        status: ApplicationStatus::Interview,
        description: "Build next-gen cloud solutions at Microsoft Azure team.",
        requirements: &["C++", "Cloud Computing", "CGPA > 7.5"],
        company_type: "MNC",
        industry: "Technology",
    },
    SeedEntry {
        id: "3",
        company: "Deloitte",
        role: "Cyber Analyst",
        cohort: "Cybersecurity",
        location: "Mumbai",
        salary: "80K/month",
        deadline_minutes: 20 * 60,
        status: ApplicationStatus::Applied,
        description: "Protect enterprise systems as a cybersecurity analyst at Deloitte.",
        requirements: &["Network Security", "SIEM", "Ethical Hacking"],
        company_type: "MNC",
        industry: "Consulting",
    },
    SeedEntry {
        id: "4",
        company: "Goldman Sachs",
        role: "Quantitative Analyst",
        cohort: "Analyst",
        location: "Bangalore",
        salary: "1.5L/month",
        deadline_minutes: 48 * 60,
        status: ApplicationStatus::Applied,
        description: "Apply mathematical models to financial markets.",
        requirements: &["Statistics", "Python", "Machine Learning", "CGPA > 8.5"],
        company_type: "MNC",
        industry: "Finance",
    },
    SeedEntry {
        id: "5",
        company: "Amazon",
        role: "Cloud Engineer",
        cohort: "SDE",
        location: "Chennai",
        salary: "1.1L/month",
        deadline_minutes: 3 * 60,
        status: ApplicationStatus::Applied,
        description: "Work on AWS infrastructure serving millions of customers.",
        requirements: &["AWS", "Distributed Systems", "Java"],
        company_type: "MNC",
        industry: "Technology",
    },
    SeedEntry {
        id: "6",
        company: "CrowdStrike",
        role: "Security Intern",
        cohort: "Cybersecurity",
        location: "Remote",
        salary: "70K/month",
        deadline_minutes: 30 * 60,
        status: ApplicationStatus::Selected,
        description: "Join a leading cybersecurity firm and defend against advanced threats.",
        requirements: &["Cybersecurity", "Incident Response", "Python"],
        company_type: "MNC",
        industry: "Cybersecurity",
    },
    SeedEntry {
        id: "7",
        company: "Flipkart",
        role: "Data Analyst",
        cohort: "Analyst",
        location: "Bangalore",
        salary: "90K/month",
        deadline_minutes: 10 * 60,
        status: ApplicationStatus::Rejected,
        description: "Analyze user behavior data to drive product decisions.",
        requirements: &["SQL", "Python", "Tableau", "Statistics"],
        company_type: "Indian Unicorn",
        industry: "E-commerce",
    },
    SeedEntry {
        id: "8",
        company: "Zomato",
        role: "Full Stack Developer",
        cohort: "SDE",
        location: "Gurgaon",
        salary: "95K/month",
        deadline_minutes: 15 * 60,
        status: ApplicationStatus::Applied,
        description: "Build features for India's leading food delivery platform.",
        requirements: &["React", "Node.js", "MongoDB", "TypeScript"],
        company_type: "Indian Unicorn",
        industry: "Food Tech",
    },
    SeedEntry {
        id: "9",
        company: "Razorpay",
        role: "Backend Developer",
        cohort: "SDE",
        location: "Bangalore",
        salary: "1.0L/month",
        deadline_minutes: 36 * 60,
        status: ApplicationStatus::Applied,
        description: "Build scalable payment infrastructure for millions of businesses.",
        requirements: &["Go/Java", "Microservices", "Databases", "API Design"],
        company_type: "Startup",
        industry: "Fintech",
    },
    SeedEntry {
        id: "10",
        company: "TCS",
        role: "Systems Engineer",
        cohort: "SDE",
        location: "Mumbai",
        salary: "58K/month",
        deadline_minutes: 72 * 60,
        status: ApplicationStatus::Applied,
        description: "Join TCS digital transformation projects across industries.",
        requirements: &["Java/Python", "SQL", "Problem Solving"],
        company_type: "Service Based",
        industry: "IT Services",
    },
];

pub fn seed_opportunities(now: DateTime<Utc>) -> Vec<Opportunity> {
    SEED.iter()
        .map(|s| Opportunity {
            id: s.id.to_string(),
            company: s.company.to_string(),
            role: s.role.to_string(),
            cohort: s.cohort.to_string(),
            location: s.location.to_string(),
            salary: s.salary.to_string(),
            deadline: now + Duration::minutes(s.deadline_minutes),
            requirements: s.requirements.iter().map(|r| r.to_string()).collect(),
            status: s.status,
            description: s.description.to_string(),
            company_type: Some(s.company_type.to_string()),
            industry: Some(s.industry.to_string()),
        })
        .collect()
}
