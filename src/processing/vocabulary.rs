//! Curated technology and role vocabulary used by the keyword extractor

use std::collections::HashSet;

/// An immutable, versioned list of known skill terms.
///
/// Terms keep their display casing ("JavaScript", "Node.js"); lookups are
/// case-insensitive. Extending a vocabulary consumes it and returns a new one,
/// so a built vocabulary never changes underneath an extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    version: String,
    terms: Vec<String>,
}

pub const BUILTIN_VERSION: &str = "builtin-1";

const LANGUAGES: &[&str] = &[
    "Rust", "Python", "JavaScript", "TypeScript", "Java", "C++", "C#", "Go", "Golang", "Ruby",
    "PHP", "Swift", "Kotlin", "Scala", "Haskell", "Clojure", "Elixir", "Erlang", "Dart", "Lua",
    "Perl", "MATLAB", "Julia", "Objective-C", "Shell", "Bash", "PowerShell", "SQL", "HTML",
    "CSS", "Sass", "Solidity", "Zig", "OCaml", "F#", "Assembly",
];

const FRAMEWORKS: &[&str] = &[
    "React", "React Native", "Vue", "Vue.js", "Angular", "Svelte", "Next.js", "Nuxt", "Gatsby",
    "Remix", "Node.js", "Express", "Express.js", "Deno", "jQuery", "Redux", "Tailwind",
    "Bootstrap", "Webpack", "Vite", "Babel", "Django", "Flask", "FastAPI", "Spring",
    "Spring Boot", "Rails", "Ruby on Rails", "Laravel", "ASP.NET", ".NET", "Flutter", "Electron",
    "Qt", "Tokio", "Actix", "Axum", "GraphQL", "gRPC", "REST", "TensorFlow", "PyTorch",
    "scikit-learn", "Pandas", "NumPy", "Jupyter", "Spark", "Hadoop", "Kafka", "Airflow",
    "Unity", "Unreal Engine", "Three.js",
];

const PLATFORMS: &[&str] = &[
    "AWS", "Azure", "GCP", "Google Cloud", "Firebase", "Heroku", "Vercel", "Netlify",
    "DigitalOcean", "Docker", "Kubernetes", "Terraform", "Ansible", "Jenkins", "GitHub Actions",
    "GitLab", "GitHub", "Git", "Linux", "Unix", "Nginx", "Redis", "Elasticsearch",
    "PostgreSQL", "MySQL", "MongoDB", "SQLite", "Cassandra", "DynamoDB", "Oracle", "Neo4j",
    "Supabase", "RabbitMQ", "Prometheus", "Grafana",
];

const PRACTICES: &[&str] = &[
    "Machine Learning", "Deep Learning", "Data Science", "Data Engineering",
    "Artificial Intelligence", "Computer Vision", "NLP", "DevOps", "MLOps", "CI/CD",
    "Microservices", "Distributed Systems", "Cloud Computing", "Serverless", "Agile", "Scrum",
    "Kanban", "TDD", "BDD", "Unit Testing", "Testing", "Jest", "Pytest", "JUnit", "Selenium",
    "Cypress", "API", "Web Development", "Mobile Development", "Frontend", "Backend",
    "Full Stack", "Blockchain", "Security", "Cybersecurity", "Algorithms", "Data Structures",
    "System Design", "Embedded Systems", "Game Development", "UI/UX", "Open Source",
];

const ROLES: &[&str] = &[
    "Software Engineer", "Developer", "Architect", "Engineer", "Data Scientist", "ML Engineer",
    "SRE", "Product Manager", "Designer", "Analyst", "Consultant", "Intern", "Junior", "Mid-level",
    "Senior", "Lead", "Staff", "Principal", "Manager", "Director", "CTO", "Leadership",
    "Communication", "Teamwork", "Problem Solving", "Mentoring", "Project Management",
];

impl Vocabulary {
    /// Build a vocabulary from arbitrary terms. Blank terms are dropped and
    /// duplicates (case-insensitive) keep their first spelling.
    pub fn new<I, S>(version: impl Into<String>, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();

        for term in terms {
            let trimmed = term.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            if seen.insert(trimmed.to_lowercase()) {
                kept.push(trimmed.to_string());
            }
        }

        Self {
            version: version.into(),
            terms: kept,
        }
    }

    /// The curated vocabulary shipped with the crate
    pub fn builtin() -> Self {
        let terms = LANGUAGES
            .iter()
            .chain(FRAMEWORKS)
            .chain(PLATFORMS)
            .chain(PRACTICES)
            .chain(ROLES);
        Self::new(BUILTIN_VERSION, terms)
    }

    /// Return a new vocabulary with additional terms appended.
    pub fn with_extra_terms<I, S>(self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra: Vec<String> = extra
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if extra.is_empty() {
            return self;
        }

        let version = format!("{}+custom.{}", self.version, extra.len());
        Self::new(version, self.terms.into_iter().chain(extra))
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        self.terms.iter().any(|t| t.to_lowercase() == needle)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}
