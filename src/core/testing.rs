//! In-memory tracker for unit tests

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use crate::core::tracker::{
    Issue, IssueTracker, Label, Milestone, NewIssue, TrackerError, PAGE_SIZE,
};

/// Records every call and keeps milestones, labels and issues in memory
#[derive(Default)]
pub struct FakeTracker {
    milestones: RefCell<Vec<Milestone>>,
    labels: RefCell<Vec<Label>>,
    issues: RefCell<Vec<Issue>>,
    created: RefCell<Vec<NewIssue>>,
    calls: RefCell<Vec<String>>,
    failing_labels: HashSet<String>,
    failing_titles: HashSet<String>,
    next_milestone: Cell<u64>,
}

fn page_of<T: Clone>(items: &[T], page: u32) -> Vec<T> {
    items
        .iter()
        .skip((page as usize - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .cloned()
        .collect()
}

fn rejected(method: &'static str, what: &str) -> TrackerError {
    TrackerError::Status {
        method,
        url: format!("fake://{what}"),
        status: 422,
        message: "Validation Failed".to_string(),
    }
}

impl FakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make creation of this label fail
    pub fn failing_label(mut self, name: &str) -> Self {
        self.failing_labels.insert(name.to_string());
        self
    }

    /// Make creation of an issue with this title fail
    pub fn failing_issue(mut self, title: &str) -> Self {
        self.failing_titles.insert(title.to_string());
        self
    }

    pub fn add_milestone(&self, title: &str, state: &str) -> u64 {
        let number = self.next_milestone.get() + 1;
        self.next_milestone.set(number);
        self.milestones.borrow_mut().push(Milestone {
            number,
            title: title.to_string(),
            state: state.to_string(),
        });
        number
    }

    pub fn add_label(&self, name: &str) {
        self.labels.borrow_mut().push(Label {
            name: name.to_string(),
            color: "000000".to_string(),
        });
    }

    pub fn milestones(&self) -> Vec<Milestone> {
        self.milestones.borrow().clone()
    }

    pub fn label_color(&self, name: &str) -> Option<String> {
        self.labels
            .borrow()
            .iter()
            .find(|l| l.name == name)
            .map(|l| l.color.clone())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn calls_named(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == name).count()
    }

    /// Payloads of every successful create call, in order
    pub fn created(&self) -> Vec<NewIssue> {
        self.created.borrow().clone()
    }

    pub fn issue(&self, number: u64) -> Option<Issue> {
        self.issues
            .borrow()
            .iter()
            .find(|i| i.number == number)
            .cloned()
    }

    fn record(&self, call: &str) {
        self.calls.borrow_mut().push(call.to_string());
    }
}

impl IssueTracker for FakeTracker {
    fn list_milestones(&self, page: u32) -> Result<Vec<Milestone>, TrackerError> {
        self.record("list_milestones");
        Ok(page_of(&self.milestones.borrow(), page))
    }

    fn create_milestone(&self, title: &str) -> Result<Milestone, TrackerError> {
        self.record("create_milestone");
        let number = self.add_milestone(title, "open");
        Ok(Milestone {
            number,
            title: title.to_string(),
            state: "open".to_string(),
        })
    }

    fn list_labels(&self, page: u32) -> Result<Vec<Label>, TrackerError> {
        self.record("list_labels");
        Ok(page_of(&self.labels.borrow(), page))
    }

    fn create_label(&self, name: &str, color: &str) -> Result<Label, TrackerError> {
        self.record("create_label");
        if self.failing_labels.contains(name) {
            return Err(rejected("POST", "labels"));
        }
        let label = Label {
            name: name.to_string(),
            color: color.to_string(),
        };
        self.labels.borrow_mut().push(label.clone());
        Ok(label)
    }

    fn create_issue(&self, issue: &NewIssue) -> Result<Issue, TrackerError> {
        self.record("create_issue");
        if self.failing_titles.contains(&issue.title) {
            return Err(rejected("POST", "issues"));
        }

        // Issue numbers start at 101
        let number = 100 + self.issues.borrow().len() as u64 + 1;
        let created = Issue {
            number,
            title: issue.title.clone(),
            body: Some(issue.body.clone()),
        };
        self.issues.borrow_mut().push(created.clone());
        self.created.borrow_mut().push(issue.clone());
        Ok(created)
    }

    fn get_issue(&self, number: u64) -> Result<Issue, TrackerError> {
        self.record("get_issue");
        self.issue(number)
            .ok_or_else(|| rejected("GET", &format!("issues/{number}")))
    }

    fn update_issue_body(&self, number: u64, body: &str) -> Result<Issue, TrackerError> {
        self.record("update_issue_body");
        let mut issues = self.issues.borrow_mut();
        let issue = issues
            .iter_mut()
            .find(|i| i.number == number)
            .ok_or_else(|| rejected("PATCH", &format!("issues/{number}")))?;
        issue.body = Some(body.to_string());
        Ok(issue.clone())
    }
}
