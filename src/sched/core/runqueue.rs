//! Anel de threads prontas
//!
//! Lista circular duplamente encadeada. Os nós vivem numa arena (`Vec` de
//! slots + lista de slots livres) e os links são índices, então nenhum
//! ponteiro cru atravessa o anel. Cada registro continua num `Box` próprio:
//! o endereço do contexto salvo não muda quando o registro troca de dono.
//!
//! ```text
//!            next ──►
//!   ┌──────┐      ┌──────┐      ┌──────┐
//!   │ head │ ───► │ novo │ ───► │  ... │ ──┐
//!   └──────┘ ◄─── └──────┘ ◄─── └──────┘   │
//!      ▲                                    │
//!      └────────────────────────────────────┘
//!            ◄── prev  (mais antigo → mais novo)
//! ```
//!
//! Inserções entram logo depois do `head`; então andar por `prev` a partir
//! do `head` visita do mais antigo ao mais novo.

use crate::sched::task::LogicalThread;
use crate::sys::Priority;

/// Nó do anel
#[derive(Debug)]
struct Link {
    thread: Box<LogicalThread>,
    next: usize,
    prev: usize,
}

/// Registro de threads prontas
#[derive(Debug, Default)]
pub struct ReadyRegistry {
    slots: Vec<Option<Link>>,
    free: Vec<usize>,
    head: Option<usize>,
    len: usize,
}

impl ReadyRegistry {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            len: 0,
        }
    }

    /// Número de threads prontas
    pub fn len(&self) -> usize {
        self.len
    }

    /// Verifica se está vazio
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insere logo depois do `head`. O `head` não muda (exceto no anel vazio).
    pub fn insert(&mut self, mut thread: Box<LogicalThread>) {
        thread.set_ready();
        let idx = self.alloc_slot();

        match self.head {
            None => {
                self.slots[idx] = Some(Link {
                    thread,
                    next: idx,
                    prev: idx,
                });
                self.head = Some(idx);
            }
            Some(head) => {
                let after = self.link(head).next;
                self.slots[idx] = Some(Link {
                    thread,
                    next: after,
                    prev: head,
                });
                self.link_mut(head).next = idx;
                self.link_mut(after).prev = idx;
            }
        }
        self.len += 1;
    }

    /// Remove e devolve a thread de menor valor de prioridade.
    ///
    /// Empates ficam com a mais antiga no anel: a busca começa no `head` e
    /// anda por `prev`, trocando o melhor só com `<` estrito.
    pub fn select_and_remove_highest_priority(&mut self) -> Option<Box<LogicalThread>> {
        let best = self.best_slot()?;
        Some(self.unlink(best))
    }

    /// Mesma seleção, sem remover
    pub fn peek_highest_priority(&self) -> Option<&LogicalThread> {
        self.best_slot().map(|idx| &*self.link(idx).thread)
    }

    /// Percorre do mais antigo ao mais novo
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            registry: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Libera todas as threads prontas (contexto, pilha e registro).
    /// Devolve quantas foram liberadas.
    pub fn teardown(&mut self) -> usize {
        let released = self.len;
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.len = 0;
        released
    }

    fn best_slot(&self) -> Option<usize> {
        let head = self.head?;
        let mut best = head;
        let mut best_priority: Priority = self.link(head).thread.priority;

        let mut cursor = self.link(head).prev;
        while cursor != head {
            let link = self.link(cursor);
            if link.thread.priority < best_priority {
                best = cursor;
                best_priority = link.thread.priority;
            }
            cursor = link.prev;
        }
        Some(best)
    }

    fn unlink(&mut self, idx: usize) -> Box<LogicalThread> {
        let link = match self.slots[idx].take() {
            Some(link) => link,
            None => unreachable!("slot livre encadeado no anel"),
        };
        self.free.push(idx);
        self.len -= 1;

        if self.len == 0 {
            self.head = None;
        } else {
            self.link_mut(link.prev).next = link.next;
            self.link_mut(link.next).prev = link.prev;
            if self.head == Some(idx) {
                self.head = Some(link.prev);
            }
        }
        link.thread
    }

    fn alloc_slot(&mut self) -> usize {
        match self.free.pop() {
            Some(idx) => idx,
            None => {
                self.slots.push(None);
                self.slots.len() - 1
            }
        }
    }

    fn link(&self, idx: usize) -> &Link {
        match self.slots[idx].as_ref() {
            Some(link) => link,
            None => unreachable!("slot livre encadeado no anel"),
        }
    }

    fn link_mut(&mut self, idx: usize) -> &mut Link {
        match self.slots[idx].as_mut() {
            Some(link) => link,
            None => unreachable!("slot livre encadeado no anel"),
        }
    }

    /// Confere a circularidade nos dois sentidos
    #[cfg(test)]
    fn is_consistent(&self) -> bool {
        let Some(head) = self.head else {
            return self.len == 0;
        };

        let mut forward = head;
        let mut backward = head;
        for _ in 0..self.len {
            let next = self.link(forward).next;
            if self.link(next).prev != forward {
                return false;
            }
            forward = next;
            backward = self.link(backward).prev;
        }
        forward == head && backward == head
    }
}

/// Iterador do mais antigo ao mais novo
pub struct Iter<'a> {
    registry: &'a ReadyRegistry,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a LogicalThread;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let registry = self.registry;
        let link = registry.link(self.cursor?);
        self.cursor = Some(link.prev);
        self.remaining -= 1;
        Some(&*link.thread)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sched::task::ThreadState;
    use crate::sys::Tid;

    fn record(id: u64, priority: Priority) -> Box<LogicalThread> {
        let mut t = LogicalThread::entry_record();
        t.tid = Tid::new(id);
        t.priority = priority;
        Box::new(t)
    }

    fn tids(reg: &ReadyRegistry) -> Vec<u64> {
        reg.iter().map(|t| t.tid.as_u64()).collect()
    }

    #[test]
    fn test_empty_registry() {
        let mut reg = ReadyRegistry::new();
        assert!(reg.is_empty());
        assert!(reg.select_and_remove_highest_priority().is_none());
        assert!(reg.peek_highest_priority().is_none());
        assert_eq!(reg.iter().count(), 0);
        assert!(reg.is_consistent());
    }

    #[test]
    fn test_insert_marks_ready_and_keeps_age_order() {
        let mut reg = ReadyRegistry::new();
        for id in 1..=4 {
            reg.insert(record(id, 3));
            assert!(reg.is_consistent());
        }
        assert_eq!(reg.len(), 4);
        assert_eq!(tids(&reg), vec![1, 2, 3, 4]);
        assert!(reg.iter().all(|t| t.state == ThreadState::Ready));
    }

    #[test]
    fn test_selects_lowest_priority_value() {
        let mut reg = ReadyRegistry::new();
        reg.insert(record(1, 2));
        reg.insert(record(2, 1));
        reg.insert(record(3, 7));
        reg.insert(record(4, -3));
        reg.insert(record(5, 0));

        let mut order = Vec::new();
        while let Some(t) = reg.select_and_remove_highest_priority() {
            order.push(t.priority);
            assert!(reg.is_consistent());
        }
        assert_eq!(order, vec![-3, 0, 1, 2, 7]);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_ties_go_to_oldest() {
        let mut reg = ReadyRegistry::new();
        reg.insert(record(1, 5));
        reg.insert(record(2, 5));
        reg.insert(record(3, 5));

        assert_eq!(reg.peek_highest_priority().map(|t| t.tid), Some(Tid::new(1)));
        let picked: Vec<u64> = core::iter::from_fn(|| reg.select_and_remove_highest_priority())
            .map(|t| t.tid.as_u64())
            .collect();
        assert_eq!(picked, vec![1, 2, 3]);
    }

    #[test]
    fn test_reinserted_record_loses_seniority() {
        let mut reg = ReadyRegistry::new();
        reg.insert(record(1, 5));
        reg.insert(record(2, 5));

        let first = reg.select_and_remove_highest_priority().unwrap();
        assert_eq!(first.tid, Tid::new(1));
        reg.insert(first);
        reg.insert(record(3, 5));

        assert_eq!(tids(&reg), vec![2, 1, 3]);
        assert_eq!(
            reg.select_and_remove_highest_priority().map(|t| t.tid),
            Some(Tid::new(2))
        );
    }

    #[test]
    fn test_removing_head_moves_anchor_to_prev() {
        let mut reg = ReadyRegistry::new();
        reg.insert(record(1, 0));
        reg.insert(record(2, 4));
        reg.insert(record(3, 4));

        let head = reg.select_and_remove_highest_priority().unwrap();
        assert_eq!(head.tid, Tid::new(1));
        assert!(reg.is_consistent());
        // O mais antigo restante vira o novo head
        assert_eq!(tids(&reg), vec![2, 3]);

        reg.insert(record(4, 4));
        assert_eq!(tids(&reg), vec![2, 3, 4]);
    }

    #[test]
    fn test_remove_from_middle_and_tail() {
        let mut reg = ReadyRegistry::new();
        reg.insert(record(1, 9));
        reg.insert(record(2, 1));
        reg.insert(record(3, 9));
        reg.insert(record(4, 0));

        assert_eq!(reg.select_and_remove_highest_priority().unwrap().tid, Tid::new(4));
        assert!(reg.is_consistent());
        assert_eq!(reg.select_and_remove_highest_priority().unwrap().tid, Tid::new(2));
        assert!(reg.is_consistent());
        assert_eq!(tids(&reg), vec![1, 3]);
    }

    #[test]
    fn test_single_record_round_trip() {
        let mut reg = ReadyRegistry::new();
        reg.insert(record(1, 2));
        assert!(reg.is_consistent());

        let t = reg.select_and_remove_highest_priority().unwrap();
        assert!(reg.is_empty());
        assert!(reg.is_consistent());

        reg.insert(t);
        assert_eq!(reg.len(), 1);
        assert!(reg.is_consistent());
    }

    #[test]
    fn test_slots_are_recycled() {
        let mut reg = ReadyRegistry::new();
        for round in 0..10 {
            reg.insert(record(round * 2, 1));
            reg.insert(record(round * 2 + 1, 2));
            reg.select_and_remove_highest_priority();
            reg.select_and_remove_highest_priority();
        }
        assert!(reg.slots.len() <= 2);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_teardown_releases_everything() {
        let mut reg = ReadyRegistry::new();
        for id in 1..=3 {
            reg.insert(record(id, id as Priority));
        }
        assert_eq!(reg.teardown(), 3);
        assert!(reg.is_empty());
        assert!(reg.is_consistent());

        reg.insert(record(9, 0));
        assert_eq!(tids(&reg), vec![9]);
    }
}
