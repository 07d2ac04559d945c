//! Resolution of relations on already-built entities.
//!
//! Rows only ever produce ids. These functions replace ids with fetched
//! entities on request. The animal ↔ sheet cycle is cut by always fetching
//! the far side in simple form: a sheet attached to an animal keeps its
//! animal as a plain id (the owner's), and an animal attached to a sheet
//! carries sheets that are themselves simple. The result is always a finite
//! tree.

use ossaca_model::*;

use crate::mapper::Mapped;
use crate::operations::OperationError;
use crate::storage::Storage;

impl Storage {
    /// Replace a stored id with the entity it names. Already-resolved links
    /// are left alone; an id with no row becomes `Unset`.
    pub fn resolve_link<T: Mapped + Identified>(
        &self,
        link: &mut Link<T>,
    ) -> Result<(), OperationError> {
        if link.is_resolved() {
            return Ok(());
        }
        *link = match link.id() {
            Some(id) => self
                .fetch_by_id::<T>(id)?
                .map_or(Link::Unset, Link::Resolved),
            None => Link::Unset,
        };
        Ok(())
    }

    pub fn resolve_food_habit(&self, habit: &mut FoodHabit) -> Result<(), OperationError> {
        self.resolve_link(&mut habit.food)?;
        self.resolve_link(&mut habit.bowl)
    }

    pub(crate) fn resolve_food_habit_link(
        &self,
        link: &mut Link<FoodHabit>,
    ) -> Result<(), OperationError> {
        self.resolve_link(link)?;
        if let Some(habit) = link.get_mut() {
            self.resolve_food_habit(habit)?;
        }
        Ok(())
    }

    /// Resolve the box of a location. The person is left as an id.
    pub fn resolve_location(&self, location: &mut Location) -> Result<(), OperationError> {
        self.resolve_link(&mut location.shelter_box)
    }

    /// Resolve a sheet's state and location (with its box), but not its
    /// animal.
    pub fn resolve_sheet_links(&self, sheet: &mut Sheet) -> Result<(), OperationError> {
        self.resolve_link(&mut sheet.state)?;
        self.resolve_link(&mut sheet.location)?;
        if let Some(location) = sheet.location.get_mut() {
            self.resolve_location(location)?;
        }
        Ok(())
    }

    /// Resolve a care sheet's care and fetch its animal in simple form.
    pub fn resolve_care_sheet(&self, sheet: &mut CareSheet) -> Result<(), OperationError> {
        self.resolve_link(&mut sheet.care)?;
        if sheet.animal.is_resolved() {
            return Ok(());
        }
        sheet.animal = match sheet.animal.id() {
            Some(id) => self
                .simple_animal_by_id(id)?
                .map_or(Link::Unset, |animal| Link::Resolved(Box::new(animal))),
            None => Link::Unset,
        };
        Ok(())
    }

    /// A sheet with its own fields, state and location, and its animal left
    /// as an id.
    pub fn simple_sheet_by_id(&self, id: Id) -> Result<Option<Sheet>, OperationError> {
        let Some(mut sheet) = self.fetch_by_id::<Sheet>(id)? else {
            return Ok(None);
        };
        self.resolve_sheet_links(&mut sheet)?;
        Ok(Some(sheet))
    }

    /// Attach an animal's arrival and latest sheets.
    ///
    /// Each sheet is fetched in simple form; its animal link is then pointed
    /// at this animal's id rather than fetched again, so resolution never
    /// descends back into the animal.
    pub fn resolve_animal_relations(&self, animal: &mut Animal) -> Result<(), OperationError> {
        let owner = animal.id;
        let arrival_id = animal.arrival_sheet.id();
        let latest_id = animal.latest_sheet.id();

        animal.arrival_sheet = self.attached_sheet(arrival_id, owner)?;
        animal.latest_sheet = if latest_id.is_some() && latest_id == arrival_id {
            animal.arrival_sheet.clone()
        } else {
            self.attached_sheet(latest_id, owner)?
        };
        Ok(())
    }

    fn attached_sheet(&self, sheet_id: Option<Id>, owner: Id) -> Result<Link<Sheet>, OperationError> {
        let Some(sheet_id) = sheet_id else {
            return Ok(Link::Unset);
        };
        Ok(match self.simple_sheet_by_id(sheet_id)? {
            Some(mut sheet) => {
                sheet.animal = Link::from_id(owner);
                Link::Resolved(sheet)
            }
            None => Link::Unset,
        })
    }

    /// Attach the animal a sheet refers to.
    ///
    /// The animal is fetched in simple form, given its food habit, and then
    /// gets its own sheets through [`Storage::resolve_animal_relations`],
    /// which only attaches simple sheets.
    pub fn resolve_sheet_animal(&self, sheet: &mut Sheet) -> Result<(), OperationError> {
        let Some(animal_id) = sheet.animal.id() else {
            sheet.animal = Link::Unset;
            return Ok(());
        };
        sheet.animal = match self.simple_animal_by_id(animal_id)? {
            Some(mut animal) => {
                self.resolve_food_habit_link(&mut animal.food_habit)?;
                self.resolve_animal_relations(&mut animal)?;
                Link::Resolved(Box::new(animal))
            }
            None => Link::Unset,
        };
        Ok(())
    }
}
